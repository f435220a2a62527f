//! Core processing logic for chatpluck.
//!
//! This module contains:
//! - [`catalog`] - Sender discovery in first-seen order
//! - [`extractor`] - Per-sender message extraction
//! - [`output`] - Document layout and writers (ODT, PDF)
//!
//! # Quick Start
//!
//! ```rust
//! use chatpluck::Transcript;
//! use chatpluck::core::{SenderCatalog, extract_checked};
//!
//! # fn main() -> chatpluck::Result<()> {
//! let transcript = Transcript::from_text("12/5/24, 9:41 PM - Alice: Hello there");
//! let catalog = SenderCatalog::from_transcript(&transcript).require_non_empty(&transcript)?;
//! let extraction = extract_checked(&transcript, &catalog, "Alice")?.require_non_empty()?;
//!
//! assert_eq!(extraction.to_document_text(), "[12/5/24, 9:41 PM] Hello there");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod extractor;
pub mod output;

pub use catalog::SenderCatalog;
pub use extractor::{Extraction, extract_checked, extract_messages};
pub use output::{Block, Document};

#[cfg(feature = "odt")]
pub use output::{to_odt, write_odt};
#[cfg(feature = "pdf")]
pub use output::{to_pdf, write_pdf};
