//! Unified error types for chatpluck.
//!
//! This module provides a single [`ChatpluckError`] enum that covers every
//! failure the library and the CLI can report.
//!
//! # Empty results are not errors
//!
//! The sender catalog and the message extractor return empty values when a
//! transcript has nothing to offer. Turning "empty" into an error is an
//! explicit step ([`SenderCatalog::require_non_empty`] and
//! [`Extraction::require_non_empty`]), which produces
//! [`ChatpluckError::NoSendersFound`] and
//! [`ChatpluckError::NoMessagesForSender`] respectively. A line that is not a
//! chat record is never an error.
//!
//! [`SenderCatalog::require_non_empty`]: crate::core::SenderCatalog::require_non_empty
//! [`Extraction::require_non_empty`]: crate::core::Extraction::require_non_empty

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatpluck operations.
///
/// # Example
///
/// ```rust
/// use chatpluck::error::Result;
/// use chatpluck::ExtractedMessage;
///
/// fn my_function() -> Result<Vec<ExtractedMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpluckError>;

/// The error type for all chatpluck operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpluckError {
    /// An I/O error occurred outside of reading the transcript.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript path does not exist or cannot be read.
    #[error("Input file not found or unreadable: {} ({source})", path.display())]
    InputNotFound {
        /// The path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The transcript is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// No line of the transcript is a chat record.
    #[error("No senders found{}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    NoSendersFound {
        /// The transcript path, if the transcript came from a file
        path: Option<PathBuf>,
    },

    /// The requested sender does not appear in the transcript.
    #[error("Sender '{sender}' does not appear in the transcript")]
    SenderNotInCatalog {
        /// The sender that was requested
        sender: String,
    },

    /// The sender is valid but the extraction produced nothing.
    #[error("No messages found for '{sender}'")]
    NoMessagesForSender {
        /// The sender that was requested
        sender: String,
    },

    /// The operator picked a sender index outside `1..=max`.
    #[error("Invalid selection '{input}'. Expected a number between 1 and {max} or a sender name")]
    InvalidSelection {
        /// What the operator typed
        input: String,
        /// Number of senders on offer
        max: usize,
    },

    /// The output path has an extension no writer handles.
    #[error("Unsupported output extension '.{extension}'. Expected one of: odt, pdf")]
    UnsupportedFormat {
        /// The extension found on the output path (lowercased, without dot)
        extension: String,
    },

    /// Rendering or writing the output document failed.
    #[error("Failed to export {format} document: {source}")]
    Export {
        /// The document format being written (e.g., "ODT", "PDF")
        format: &'static str,
        /// The underlying failure
        #[source]
        source: ExportErrorKind,
    },

    /// The personality analysis request failed.
    #[error("Analysis failed: {0}")]
    Analysis(#[source] AnalysisErrorKind),

    /// A required configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Kinds of export errors.
#[derive(Debug, Error)]
pub enum ExportErrorKind {
    /// Writing the file failed
    #[error("{0}")]
    Io(#[from] io::Error),
    /// Building the ODT zip container failed
    #[cfg(feature = "odt")]
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),
    /// Building the PDF failed
    #[error("{0}")]
    Pdf(String),
    /// The writer for this format was compiled out
    #[error("the '{0}' feature is not enabled")]
    FeatureDisabled(&'static str),
}

/// Kinds of analysis errors.
#[derive(Debug, Error)]
pub enum AnalysisErrorKind {
    /// The endpoint refused the connection
    #[error("cannot connect to {url}. Is Ollama running?")]
    Connection {
        /// The endpoint base URL
        url: String,
    },
    /// The request did not complete in time
    #[error("request timed out after {secs}s")]
    Timeout {
        /// The configured timeout
        secs: u64,
    },
    /// The endpoint answered with a non-success status
    #[error("endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or the endpoint's error message
        body: String,
    },
    /// Any other HTTP client failure
    #[error("{0}")]
    Http(String),
    /// The response could not be decoded
    #[error("invalid response: {0}")]
    Response(String),
    /// There was nothing to analyze
    #[error("no message text to analyze")]
    EmptyInput,
}

impl From<std::string::FromUtf8Error> for ChatpluckError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatpluckError::Utf8 {
            context: "transcript".to_string(),
            source: err,
        }
    }
}

impl From<AnalysisErrorKind> for ChatpluckError {
    fn from(kind: AnalysisErrorKind) -> Self {
        ChatpluckError::Analysis(kind)
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpluckError {
    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatpluckError::InputNotFound {
            path: path.into(),
            source,
        }
    }

    /// Creates a sender-not-in-catalog error.
    pub fn sender_not_in_catalog(sender: impl Into<String>) -> Self {
        ChatpluckError::SenderNotInCatalog {
            sender: sender.into(),
        }
    }

    /// Creates a no-messages-for-sender error.
    pub fn no_messages(sender: impl Into<String>) -> Self {
        ChatpluckError::NoMessagesForSender {
            sender: sender.into(),
        }
    }

    /// Creates an unsupported-format error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        ChatpluckError::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Creates an export error.
    pub fn export(format: &'static str, source: impl Into<ExportErrorKind>) -> Self {
        ChatpluckError::Export {
            format,
            source: source.into(),
        }
    }

    /// Returns `true` if the transcript could not be read.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, ChatpluckError::InputNotFound { .. })
    }

    /// Returns `true` if the transcript held no chat records.
    pub fn is_no_senders(&self) -> bool {
        matches!(self, ChatpluckError::NoSendersFound { .. })
    }

    /// Returns `true` if the requested sender is unknown.
    pub fn is_sender_not_in_catalog(&self) -> bool {
        matches!(self, ChatpluckError::SenderNotInCatalog { .. })
    }

    /// Returns `true` if the extraction came back empty.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatpluckError::NoMessagesForSender { .. })
    }

    /// Returns `true` if this is an export failure or an unsupported output format.
    pub fn is_export(&self) -> bool {
        matches!(
            self,
            ChatpluckError::Export { .. } | ChatpluckError::UnsupportedFormat { .. }
        )
    }

    /// Returns `true` if this is an analysis failure.
    pub fn is_analysis(&self) -> bool {
        matches!(self, ChatpluckError::Analysis(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
