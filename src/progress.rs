//! Terminal progress and logging share stderr, so log records are routed
//! through the same `MultiProgress` that draws the scan bar.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::SetLoggerError;

/// Installs env_logger (default filter `warn`, override with `RUST_LOG`)
/// behind a bridge that suspends progress bars while a record is printed.
pub fn init_logging() -> Result<MultiProgress, SetLoggerError> {
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).build();
    let level = logger.filter();

    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger).try_init()?;
    log::set_max_level(level);

    Ok(multi)
}

/// Bar for the scan phase; the length is set once the PDFs are collected
pub fn scan_bar(multi: &MultiProgress) -> ProgressBar {
    let pb = multi.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
