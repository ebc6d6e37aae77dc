//! Document Text Extractor — plain text out of uploaded resume files.
//!
//! Dispatch is a closed enum, not a string comparison: adding a format means
//! adding a variant and the compiler walks you to every match.
//!
//! Policy: an unrecognized format yields an empty string (no extractor
//! exists — non-fatal); a recognized format that fails to parse is an
//! `ExtractError` (corrupt input — fatal). Callers rely on the distinction.

use std::path::{Path, PathBuf};

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from PDF {path}: {source}")]
    Pdf {
        path: PathBuf,
        #[source]
        source: pdf_extract::OutputError,
    },

    #[error("Failed to parse DOCX {path}: {source}")]
    Docx {
        path: PathBuf,
        #[source]
        source: docx_rs::ReaderError,
    },
}

/// The closed set of document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Unrecognized,
}

impl DocumentFormat {
    /// Maps a file extension (without the dot, any case) to a format tag.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            _ => DocumentFormat::Unrecognized,
        }
    }

    /// Derives the format from a file name's extension. No extension at all
    /// is treated the same as an unknown one.
    pub fn from_file_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unrecognized)
    }
}

/// Extracts the plain text of `path` according to `format`.
///
/// PDF pages and DOCX paragraphs are joined with `\n`, preserving the
/// document's structural unit count as a line count.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, ExtractError> {
    debug!("Extracting text from {} ({:?})", path.display(), format);
    match format {
        DocumentFormat::Pdf => extract_pdf(path),
        DocumentFormat::Docx => extract_docx(path),
        DocumentFormat::Unrecognized => {
            warn!("Unrecognized document format for {}", path.display());
            Ok(String::new())
        }
    }
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    // extract_text_by_pages loads, renders and drops the document internally,
    // so the handle is released on every path including parse failure.
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|source| ExtractError::Pdf {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(pages.join("\n"))
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let docx = docx_rs::read_docx(&bytes).map_err(|source| ExtractError::Docx {
        path: path.to_path_buf(),
        source,
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();
    Ok(paragraphs.join("\n"))
}

/// Concatenates the text runs of one paragraph, in document order.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn docx_fixture(paragraphs: &[&str]) -> NamedTempFile {
        let mut docx = Docx::new();
        for text in paragraphs {
            let mut paragraph = Paragraph::new();
            if !text.is_empty() {
                paragraph = paragraph.add_run(Run::new().add_text(*text));
            }
            docx = docx.add_paragraph(paragraph);
        }
        let mut file = NamedTempFile::new().unwrap();
        docx.build().pack(file.as_file_mut()).unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("docx"), DocumentFormat::Docx);
        assert_eq!(
            DocumentFormat::from_extension("txt"),
            DocumentFormat::Unrecognized
        );
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(
            DocumentFormat::from_file_name("resume.Docx"),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_file_name("resume"),
            DocumentFormat::Unrecognized
        );
    }

    #[test]
    fn test_unrecognized_format_returns_empty_string() {
        // The path does not even need to exist: no extractor runs.
        let text = extract_text(
            Path::new("no/such/file.xyz"),
            DocumentFormat::Unrecognized,
        )
        .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let file = docx_fixture(&["Name: A", "Skills: B", ""]);
        let text = extract_text(file.path(), DocumentFormat::Docx).unwrap();
        assert_eq!(text, "Name: A\nSkills: B\n");
    }

    #[test]
    fn test_docx_line_count_matches_paragraph_count() {
        let file = docx_fixture(&["one", "two", "three", "four"]);
        let text = extract_text(file.path(), DocumentFormat::Docx).unwrap();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();
        let err = extract_text(file.path(), DocumentFormat::Pdf).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf { .. }));
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();
        let err = extract_text(file.path(), DocumentFormat::Docx).unwrap_err();
        assert!(matches!(err, ExtractError::Docx { .. }));
    }

    #[test]
    fn test_missing_docx_file_is_an_io_error() {
        let err =
            extract_text(Path::new("no/such/resume.docx"), DocumentFormat::Docx).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
