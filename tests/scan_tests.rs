// Integration tests for the directory scanner

mod common;

use std::io::{self, Write};
use std::path::Path;

use pdfseek::scan::{collect_pdf_paths, is_pdf};
use pdfseek::{PdfseekError, Scanner, SearchRequest, SearchResult};
use tempfile::TempDir;

use common::{write_file, write_pdf};

fn scan(root: &Path, pattern: &str) -> (SearchResult, String) {
    let request = SearchRequest::new(root, pattern).unwrap();
    let scanner = Scanner::for_request(&request).unwrap();
    let mut out = Vec::new();
    let result = scanner.scan(&request, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_invoice_scenario() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(
        &dir.path().join("a.pdf"),
        &["invoice for March", "terms", "INVOICE total"],
    );
    write_pdf(&dir.path().join("b.pdf"), &["receipt", "thanks"]);
    write_file(&dir.path().join("notes.txt"), "invoice invoice invoice");

    let (result, output) = scan(dir.path(), "invoice");

    assert_eq!(result.len(), 1);
    assert_eq!(result.pages(&a), Some(&[1, 3][..]));
    assert_eq!(result.total_files(), 2);
    assert_eq!(result.files_with_matches(), 1);
    assert_eq!(output, "Found matches in a.pdf on pages: [1, 3]\n");
    assert_eq!(
        result.summary_line(),
        "Search complete. Found matches in 1 of 2 PDF files."
    );
}

#[test]
fn test_empty_tree_gives_empty_result() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("one/two")).unwrap();

    let (result, output) = scan(dir.path(), "anything");

    assert!(result.is_empty());
    assert_eq!(result.total_files(), 0);
    assert!(output.is_empty());
}

#[test]
fn test_nested_directories_and_uppercase_extension() {
    let dir = TempDir::new().unwrap();
    let deep = write_pdf(&dir.path().join("x/y/z/Report.PDF"), &["Quarterly report"]);
    let shallow = write_pdf(&dir.path().join("x/summary.pdf"), &["cover", "report appendix"]);

    let (result, output) = scan(dir.path(), "report");

    assert_eq!(result.total_files(), 2);
    assert_eq!(result.pages(&deep), Some(&[1][..]));
    assert_eq!(result.pages(&shallow), Some(&[2][..]));
    assert!(output.contains(&format!("Found matches in {} on pages: [1]", Path::new("x/y/z/Report.PDF").display())));
}

#[test]
fn test_keys_are_absolute_and_never_empty() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("hit.pdf"), &["needle"]);
    write_pdf(&dir.path().join("miss.pdf"), &["hay"]);
    write_file(&dir.path().join("corrupt.pdf"), "%PDF-garbage");

    let (result, _) = scan(dir.path(), "needle");

    assert_eq!(result.total_files(), 3);
    for (path, pages) in result.iter() {
        assert!(path.is_absolute());
        assert!(!pages.is_empty());
    }
}

#[test]
fn test_record_ignores_empty_page_lists() {
    let mut result = SearchResult::new();
    assert!(!result.record("/docs/empty.pdf".into(), Vec::new()));
    assert!(result.record("/docs/full.pdf".into(), vec![2, 4]));

    assert_eq!(result.len(), 1);
    assert_eq!(result.total_files(), 2);
    assert_eq!(result.pages(Path::new("/docs/empty.pdf")), None);
    assert_eq!(result.get_index(0), Some((Path::new("/docs/full.pdf"), &[2, 4][..])));
}

#[test]
fn test_collect_skips_other_extensions() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("a.pdf.txt"), "");
    write_file(&dir.path().join("pdf"), "");
    let b = write_file(&dir.path().join("b.Pdf"), "");

    assert_eq!(collect_pdf_paths(dir.path()), vec![b]);
    assert!(is_pdf(Path::new("c.pDf")));
    assert!(!is_pdf(Path::new("c.pdfx")));
}

#[test]
fn test_missing_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = SearchRequest::new(dir.path().join("nope"), "x").unwrap_err();
    assert!(matches!(err, PdfseekError::RootNotFound(_)));
}

#[test]
fn test_file_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir.path().join("plain.txt"), "hi");
    assert!(matches!(
        SearchRequest::new(&file, "x"),
        Err(PdfseekError::RootNotFound(_))
    ));
}

#[test]
fn test_relative_root_becomes_absolute() {
    let request = SearchRequest::new(".", "x").unwrap();
    assert!(request.root_directory().is_absolute());
    assert_eq!(request.pattern(), "x");
}

/// Output sink that fails like a closed pipe
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failing_output_does_not_stop_the_scan() {
    let dir = TempDir::new().unwrap();
    let first = write_pdf(&dir.path().join("1.pdf"), &["needle"]);
    let second = write_pdf(&dir.path().join("2.pdf"), &["hay", "NEEDLE"]);

    let request = SearchRequest::new(dir.path(), "needle").unwrap();
    let scanner = Scanner::for_request(&request).unwrap();
    let result = scanner.scan(&request, &mut BrokenPipe);

    assert_eq!(result.total_files(), 2);
    assert_eq!(result.pages(&first), Some(&[1][..]));
    assert_eq!(result.pages(&second), Some(&[2][..]));
}
