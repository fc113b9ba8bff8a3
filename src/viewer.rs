use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ViewerConfig;
use crate::error::{PdfseekError, Result};

/// One resolved viewer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerLaunchSpec {
    pub executable: PathBuf,
    pub file: PathBuf,
    pub page: u32,
    pub page_flag: String,
}

impl ViewerLaunchSpec {
    /// Picks the first candidate executable that exists.
    pub fn resolve(config: &ViewerConfig, file: &Path, page: u32) -> Result<Self> {
        let executable = config
            .candidates
            .iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| PdfseekError::ViewerNotFound(config.candidates.clone()))?;

        Ok(Self {
            executable: executable.clone(),
            file: file.to_path_buf(),
            page,
            page_flag: config.page_flag.clone(),
        })
    }

    /// `<page-flag> page=<N> <file>`
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from(&self.page_flag),
            OsString::from(format!("page={}", self.page)),
            self.file.clone().into_os_string(),
        ]
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command.args(self.args());
        command
    }
}

/// Opens a file at a page
pub trait Launcher {
    fn launch(&mut self, file: &Path, page: u32) -> Result<()>;
}

/// Starts the external viewer and leaves it running
#[derive(Debug, Clone, Default)]
pub struct ViewerLauncher {
    config: ViewerConfig,
}

impl ViewerLauncher {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }
}

impl Launcher for ViewerLauncher {
    fn launch(&mut self, file: &Path, page: u32) -> Result<()> {
        let spec = ViewerLaunchSpec::resolve(&self.config, file, page)?;

        // The child is dropped without waiting; the viewer outlives us
        let child = spec.command().spawn().map_err(|source| PdfseekError::Launch {
            path: file.to_path_buf(),
            source,
        })?;

        log::info!(
            "Started {} (pid {}) for {} at page {}",
            spec.executable.display(),
            child.id(),
            file.display(),
            page
        );
        Ok(())
    }
}
