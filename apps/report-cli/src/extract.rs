//! Document text extraction.
//!
//! Extraction failures are per-document: the batch logs them and moves on.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract PDF text from {path}: {message}")]
    Pdf { path: String, message: String },
}

/// Extract plain text from a report file.
///
/// `.txt` files are decoded as UTF-8 with invalid bytes replaced rather than
/// failing; `.pdf` files go through pdf-extract. Anything else is an
/// unsupported format.
pub fn read_document(path: &Path) -> Result<String, ExtractionError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "txt" | "text" => {
            let bytes = fs::read(path).map_err(|source| ExtractionError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        "pdf" => pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
        other => Err(ExtractionError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_plain_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, "introduction conclusion done").unwrap();
        assert_eq!(read_document(&path).unwrap(), "introduction conclusion done");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"intro \xff\xfe conclusion").unwrap();
        let text = read_document(&path).unwrap();
        assert!(text.starts_with("intro "));
        assert!(text.ends_with(" conclusion"));
    }

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let err = read_document(Path::new("report.docx")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = read_document(Path::new("/nonexistent/report.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::Read { .. }));
    }
}
