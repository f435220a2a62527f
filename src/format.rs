//! Output document formats.
//!
//! The format is picked from the output path's extension, case-insensitively:
//! `.odt` writes OpenDocument Text, `.pdf` writes PDF. Anything else is
//! [`ChatpluckError::UnsupportedFormat`].
//!
//! # Example
//!
//! ```rust
//! use chatpluck::format::DocumentFormat;
//!
//! # fn main() -> chatpluck::Result<()> {
//! assert_eq!(DocumentFormat::from_path("Alice.PDF")?, DocumentFormat::Pdf);
//! assert!(DocumentFormat::from_path("alice.docx").is_err());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::output::Document;
use crate::error::{ChatpluckError, ExportErrorKind, Result};

/// Document format for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum DocumentFormat {
    /// OpenDocument Text (default)
    #[default]
    Odt,

    /// Paginated A4 PDF
    Pdf,
}

impl DocumentFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use chatpluck::format::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::Odt.extension(), "odt");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Odt => "odt",
            DocumentFormat::Pdf => "pdf",
        }
    }

    /// Returns all available formats.
    pub fn all() -> &'static [DocumentFormat] {
        &[DocumentFormat::Odt, DocumentFormat::Pdf]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Odt => "application/vnd.oasis.opendocument.text",
            DocumentFormat::Pdf => "application/pdf",
        }
    }

    /// Returns the Cargo feature that compiles this format's writer.
    pub fn feature(&self) -> &'static str {
        match self {
            DocumentFormat::Odt => "odt",
            DocumentFormat::Pdf => "pdf",
        }
    }

    /// Detects the format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "odt" => Ok(DocumentFormat::Odt),
            "pdf" => Ok(DocumentFormat::Pdf),
            _ => Err(ChatpluckError::unsupported_format(ext)),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Odt => write!(f, "ODT"),
            DocumentFormat::Pdf => write!(f, "PDF"),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "odt" => Ok(DocumentFormat::Odt),
            "pdf" => Ok(DocumentFormat::Pdf),
            _ => Err(format!("Unknown format: '{}'. Expected one of: odt, pdf", s)),
        }
    }
}

/// Writes `doc` to `path` in `format`.
///
/// # Errors
///
/// [`ChatpluckError::Export`] if the writer fails or was compiled out.
#[allow(unused_variables)]
pub fn write_document(doc: &Document, path: impl AsRef<Path>, format: DocumentFormat) -> Result<()> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "odt")]
        DocumentFormat::Odt => crate::core::output::write_odt(doc, path)?,
        #[cfg(feature = "pdf")]
        DocumentFormat::Pdf => crate::core::output::write_pdf(doc, path)?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ChatpluckError::export(
                "document",
                ExportErrorKind::FeatureDisabled(format.feature()),
            ));
        }
    }
    info!(path = %path.display(), %format, "document written");
    Ok(())
}

/// Writes `doc` to `path`, picking the format from the extension.
pub fn export(doc: &Document, path: impl AsRef<Path>) -> Result<DocumentFormat> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    write_document(doc, path, format)?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path("a.odt").unwrap(), DocumentFormat::Odt);
        assert_eq!(DocumentFormat::from_path("a.ODT").unwrap(), DocumentFormat::Odt);
        assert_eq!(
            DocumentFormat::from_path("/tmp/dir.v2/a.Pdf").unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        let err = DocumentFormat::from_path("a.docx").unwrap_err();
        assert!(matches!(err, ChatpluckError::UnsupportedFormat { ref extension } if extension == "docx"));

        let err = DocumentFormat::from_path("no_extension").unwrap_err();
        assert!(matches!(err, ChatpluckError::UnsupportedFormat { ref extension } if extension.is_empty()));

        assert!(DocumentFormat::from_path("archive.odt.txt").is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(DocumentFormat::from_str("PDF").unwrap(), DocumentFormat::Pdf);
        assert!(DocumentFormat::from_str("rtf").is_err());
    }

    #[test]
    fn test_format_display_and_mime() {
        assert_eq!(DocumentFormat::Odt.to_string(), "ODT");
        assert_eq!(DocumentFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(DocumentFormat::all().len(), 2);
        assert_eq!(DocumentFormat::default(), DocumentFormat::Odt);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&DocumentFormat::Pdf).unwrap();
        assert_eq!(json, "\"pdf\"");
    }

    #[cfg(all(feature = "odt", feature = "pdf"))]
    #[test]
    fn test_export_dispatches_on_extension() {
        use crate::core::output::Block;

        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new().with_block(Block::Title("Messages from Alice".into()));

        let odt = dir.path().join("a.odt");
        assert_eq!(export(&doc, &odt).unwrap(), DocumentFormat::Odt);
        assert_eq!(&std::fs::read(&odt).unwrap()[..2], b"PK");

        let pdf = dir.path().join("a.PDF");
        assert_eq!(export(&doc, &pdf).unwrap(), DocumentFormat::Pdf);
        assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-"));

        let txt = dir.path().join("a.txt");
        assert!(export(&doc, &txt).unwrap_err().is_export());
        assert!(!txt.exists());
    }
}
