use std::path::{Path, PathBuf};

use crate::error::{PdfseekError, Result};

/// Default Foxit PDF Reader install locations, probed in order
pub const DEFAULT_VIEWER_CANDIDATES: [&str; 2] = [
    r"C:\Program Files (x86)\Foxit Software\Foxit PDF Reader\FoxitPDFReader.exe",
    r"C:\Program Files\Foxit Software\Foxit PDF Reader\FoxitPDFReader.exe",
];

/// Flag that puts the viewer into "open action" mode so `page=N` is honoured
pub const DEFAULT_PAGE_FLAG: &str = "/A";

/// What to search for and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    root_directory: PathBuf,
    pattern: String,
}

impl SearchRequest {
    /// Resolves `root` to an absolute path and checks that it is a directory.
    pub fn new(root: impl AsRef<Path>, pattern: impl Into<String>) -> Result<Self> {
        let root = root.as_ref();
        let root_directory =
            std::path::absolute(root).map_err(|_| PdfseekError::RootNotFound(root.to_path_buf()))?;

        if !root_directory.is_dir() {
            return Err(PdfseekError::RootNotFound(root_directory));
        }

        Ok(Self {
            root_directory,
            pattern: pattern.into(),
        })
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Where to look for the external viewer and how to ask it for a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub candidates: Vec<PathBuf>,
    pub page_flag: String,
}

impl ViewerConfig {
    /// Puts `path` in front of the built-in candidates.
    pub fn with_preferred(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, path.into());
        self
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_VIEWER_CANDIDATES.iter().map(PathBuf::from).collect(),
            page_flag: DEFAULT_PAGE_FLAG.to_string(),
        }
    }
}

/// Everything the binary needs, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub request: SearchRequest,
    pub viewer: ViewerConfig,
    pub interactive: bool,
}

impl Config {
    /// Falls back to the home directory when no root is given.
    pub fn new(
        root: Option<PathBuf>,
        pattern: String,
        viewer: Option<PathBuf>,
        interactive: bool,
    ) -> Result<Self> {
        let root = match root {
            Some(dir) => dir,
            None => dirs::home_dir().ok_or(PdfseekError::HomeDirUnavailable)?,
        };

        let viewer = match viewer {
            Some(path) => ViewerConfig::default().with_preferred(path),
            None => ViewerConfig::default(),
        };

        Ok(Self {
            request: SearchRequest::new(root, pattern)?,
            viewer,
            interactive,
        })
    }
}
