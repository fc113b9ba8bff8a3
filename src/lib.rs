//! Search a folder of PDFs page by page and open the matches in a viewer.

pub mod config;
pub mod error;
pub mod matcher;
pub mod opener;
pub mod progress;
pub mod scan;
pub mod viewer;

pub use config::{Config, SearchRequest, ViewerConfig};
pub use error::{PdfseekError, Result};
pub use matcher::{PageMatcher, PageSource, PdfDocument};
pub use opener::Opener;
pub use scan::{Scanner, SearchResult};
pub use viewer::{Launcher, ViewerLaunchSpec, ViewerLauncher};
