use std::io;
use std::path::PathBuf;

/// Result type alias for pdfseek operations
pub type Result<T> = std::result::Result<T, PdfseekError>;

/// Custom error type for search and open operations
///
/// Only `RootNotFound`, `HomeDirUnavailable` and `InvalidPattern` stop the
/// program. Everything else is logged or reported where it happens and the
/// scan or menu carries on.
#[derive(Debug, thiserror::Error)]
pub enum PdfseekError {
    #[error("Folder not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Unable to determine the user's home directory")]
    HomeDirUnavailable,

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The PDF could not be opened or parsed at all
    #[error("Error reading {}: {reason}", path.display())]
    FileOpen { path: PathBuf, reason: String },

    /// Text extraction failed on a single page
    #[error("Error processing page {page} in {}: {reason}", path.display())]
    PageExtract {
        path: PathBuf,
        page: u32,
        reason: String,
    },

    #[error("{0}")]
    InvalidSelection(String),

    #[error("PDF viewer not found. Looked in: {}", display_paths(.0))]
    ViewerNotFound(Vec<PathBuf>),

    #[error("Error opening {}: {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
