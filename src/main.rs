use clap::Parser;
use indicatif::MultiProgress;
use std::io;
use std::path::PathBuf;
use std::process;

use pdfseek::progress::{init_logging, scan_bar};
use pdfseek::{Config, Opener, Scanner, ViewerLauncher};

#[derive(Parser)]
#[command(author, version, about = "Search PDFs page by page and open the matches")]
struct Cli {
    /// Case-insensitive regular expression to look for
    pattern: String,

    /// Directory to search in (defaults to the home directory)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Viewer executable to try before the built-in locations
    #[arg(long)]
    viewer: Option<PathBuf>,

    /// Only print the results, do not offer to open them
    #[arg(long)]
    no_open: bool,
}

fn main() {
    let cli = Cli::parse();

    let multi = match init_logging() {
        Ok(multi) => multi,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cli, &multi) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, multi: &MultiProgress) -> anyhow::Result<()> {
    let config = Config::new(cli.directory, cli.pattern, cli.viewer, !cli.no_open)?;
    let request = &config.request;

    let scanner = Scanner::for_request(request)?.with_progress(scan_bar(multi));

    println!(
        "Searching for '{}' in {} and its subfolders...",
        request.pattern(),
        request.root_directory().display()
    );

    let stdout = io::stdout();
    let results = scanner.scan(request, &mut stdout.lock());
    println!("\n{}", results.summary_line());

    if config.interactive {
        let launcher = ViewerLauncher::new(config.viewer.clone());
        Opener::new(&results, io::stdin().lock(), io::stdout(), launcher).run()?;
    } else if results.is_empty() {
        println!("No matches found.");
    }

    Ok(())
}
