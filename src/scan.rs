use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indicatif::ProgressBar;
use walkdir::WalkDir;

use crate::config::SearchRequest;
use crate::error::Result;
use crate::matcher::PageMatcher;

/// Matched pages per file, in the order the files were scanned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    matches: IndexMap<PathBuf, Vec<u32>>,
    total_files: usize,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one scanned file and keeps its pages if there are any.
    /// Returns true when the file had matches.
    pub fn record(&mut self, path: PathBuf, pages: Vec<u32>) -> bool {
        self.total_files += 1;
        if pages.is_empty() {
            return false;
        }
        self.matches.insert(path, pages);
        true
    }

    pub fn pages(&self, path: &Path) -> Option<&[u32]> {
        self.matches.get(path).map(Vec::as_slice)
    }

    /// The `index`th matched file (0-based) and its pages.
    pub fn get_index(&self, index: usize) -> Option<(&Path, &[u32])> {
        self.matches
            .get_index(index)
            .map(|(path, pages)| (path.as_path(), pages.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[u32])> {
        self.matches
            .iter()
            .map(|(path, pages)| (path.as_path(), pages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn files_with_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Search complete. Found matches in {} of {} PDF files.",
            self.files_with_matches(),
            self.total_files
        )
    }
}

/// Walks a directory tree and runs the page matcher over every PDF in it
pub struct Scanner {
    matcher: PageMatcher,
    progress: ProgressBar,
}

impl Scanner {
    pub fn new(matcher: PageMatcher) -> Self {
        Self {
            matcher,
            progress: ProgressBar::hidden(),
        }
    }

    /// Builds a scanner for the request's pattern.
    pub fn for_request(request: &SearchRequest) -> Result<Self> {
        Ok(Self::new(PageMatcher::new(request.pattern())?))
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Scans every PDF under the request's root, writing one line to `out`
    /// for each file with matches. A failing `out` is logged, not fatal.
    pub fn scan<W: Write>(&self, request: &SearchRequest, out: &mut W) -> SearchResult {
        let root = request.root_directory();
        let pdf_paths = collect_pdf_paths(root);

        self.progress.set_length(pdf_paths.len() as u64);
        self.progress.set_message("Scanning PDFs");

        let mut result = SearchResult::new();
        for path in pdf_paths {
            log::debug!("Scanning {}", path.display());
            let pages = self.matcher.match_file(&path);

            if !pages.is_empty() {
                let relative = path.strip_prefix(root).unwrap_or(&path);
                let line = format!(
                    "Found matches in {} on pages: {:?}",
                    relative.display(),
                    pages
                );
                if let Err(e) = self.progress.suspend(|| writeln!(out, "{}", line)) {
                    log::warn!("Could not report matches in {}: {}", path.display(), e);
                }
            }

            result.record(path, pages);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        result
    }
}

/// Collect every PDF under `root`, sorted by file name within each directory
pub fn collect_pdf_paths(root: &Path) -> Vec<PathBuf> {
    let mut pdf_paths = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_pdf(path) {
            pdf_paths.push(path.to_path_buf());
        }
    }

    pdf_paths
}

/// Checks for a `.pdf` extension, ignoring case
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}
