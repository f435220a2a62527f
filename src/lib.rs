//! # Chatpluck
//!
//! A Rust library for pulling one participant's messages out of an exported
//! chat transcript and saving them as a document.
//!
//! ## Overview
//!
//! A transcript is a text export where each message is one line:
//!
//! ```text
//! 12/5/24, 9:41 PM - Alice: Hello there
//! ```
//!
//! Lines that do not have this shape (system notices, wrapped continuation
//! lines, blank lines) are skipped. Chatpluck:
//! - lists the distinct senders of a transcript ([`SenderCatalog`])
//! - extracts every message of one sender, in order ([`extract_messages`])
//! - optionally asks a local model for a personality summary ([`analysis`])
//! - writes the result as `.odt` or `.pdf` ([`format`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatpluck::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = Transcript::from_path("messages.txt")?;
//!     let catalog = SenderCatalog::from_transcript(&transcript).require_non_empty(&transcript)?;
//!
//!     let extraction = extract_checked(&transcript, &catalog, "Alice")?.require_non_empty()?;
//!     let doc = Document::from_extraction(&extraction, None);
//!     export(&doc, "messages_Alice.odt")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] — line grammar ([`Grammar`](parsing::Grammar), [`classify_line`](parsing::classify_line))
//! - [`transcript`] — [`Transcript`], the loaded export
//! - [`core`] — [`SenderCatalog`], [`Extraction`], document layout and writers
//! - [`format`] — [`DocumentFormat`](format::DocumentFormat) and extension-based export
//! - [`analysis`] — [`AnalysisClient`](analysis::AnalysisClient) and the Ollama client
//! - [`prompt`] — interactive operator prompts
//! - [`config`] — [`ExtractConfig`](config::ExtractConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`cli`] — CLI argument types (feature `cli`)
//! - [`error`] — unified error types ([`ChatpluckError`], [`Result`])
//! - [`prelude`] — convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parsing;
pub mod prompt;
pub mod transcript;

// Re-export the main types at the crate root for convenience
pub use crate::core::{Extraction, SenderCatalog, extract_checked, extract_messages};
pub use error::{ChatpluckError, Result};
pub use message::{ChatRecord, ExtractedMessage};
pub use transcript::Transcript;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpluck::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::message::{ChatRecord, ExtractedMessage};
    pub use crate::transcript::Transcript;

    // Error types
    pub use crate::error::{ChatpluckError, Result};

    // Grammar
    pub use crate::parsing::{Grammar, classify_line};

    // Catalog and extraction
    pub use crate::core::{Extraction, SenderCatalog, extract_checked, extract_messages};

    // Documents
    pub use crate::core::output::{Block, Document};
    pub use crate::format::{DocumentFormat, export, write_document};

    // Analysis
    pub use crate::analysis::{AnalysisClient, CannedClient, analyze, strip_think};
    #[cfg(feature = "analysis")]
    pub use crate::analysis::OllamaClient;

    // Configuration
    pub use crate::config::{AnalysisConfig, ExtractConfig};
}
