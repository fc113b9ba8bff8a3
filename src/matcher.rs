//! Page-level text matching.
//!
//! A [`PageMatcher`] walks the pages of one document through the
//! [`PageSource`] seam and reports the 1-based numbers of the pages whose
//! text matches a case-insensitive regular expression. Failures are kept
//! local: a file that cannot be opened yields no pages, a page that cannot
//! be extracted is skipped.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use lopdf::Document;
use regex::{Regex, RegexBuilder};

use crate::error::{PdfseekError, Result};

/// Anything that can hand out text one page at a time
pub trait PageSource {
    /// Page numbers in ascending order, starting at 1.
    fn page_numbers(&self) -> Vec<u32>;

    /// Text of one page. `Ok(None)` means the page has no text layer.
    fn page_text(&self, page: u32) -> Result<Option<String>>;
}

/// A PDF loaded with lopdf
pub struct PdfDocument {
    path: PathBuf,
    doc: Document,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path).map_err(|e| PdfseekError::FileOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if doc.is_encrypted() {
            return Err(PdfseekError::FileOpen {
                path: path.to_path_buf(),
                reason: "document is encrypted".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

impl PageSource for PdfDocument {
    fn page_numbers(&self) -> Vec<u32> {
        // get_pages is a BTreeMap keyed by page number, already ascending
        self.doc.get_pages().keys().copied().collect()
    }

    fn page_text(&self, page: u32) -> Result<Option<String>> {
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| self.doc.extract_text(&[page])));

        let reason = match extracted {
            Ok(Ok(text)) if text.trim().is_empty() => return Ok(None),
            Ok(Ok(text)) => return Ok(Some(text)),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload),
        };

        Err(PdfseekError::PageExtract {
            path: self.path.clone(),
            page,
            reason,
        })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("extractor panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("extractor panicked: {}", msg)
    } else {
        "extractor panicked".to_string()
    }
}

/// Tests page text against a case-insensitive regular expression
#[derive(Debug, Clone)]
pub struct PageMatcher {
    regex: Regex,
}

impl PageMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        !text.is_empty() && self.regex.is_match(text)
    }

    /// Returns the ascending page numbers of `source` whose text matches.
    pub fn match_pages<S: PageSource>(&self, source: &S) -> Vec<u32> {
        let mut matches = Vec::new();

        for page in source.page_numbers() {
            match source.page_text(page) {
                Ok(Some(text)) => {
                    if self.is_match(&text) {
                        matches.push(page);
                    }
                }
                Ok(None) => {}
                Err(e) => log::warn!("{}", e),
            }
        }

        matches
    }

    /// Opens `path` and matches its pages. Unreadable files yield no pages.
    pub fn match_file(&self, path: &Path) -> Vec<u32> {
        match PdfDocument::open(path) {
            Ok(doc) => self.match_pages(&doc),
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        }
    }
}
