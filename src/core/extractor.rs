//! Per-sender message extraction.
//!
//! [`extract_messages`] is a stable filter over a [`Transcript`]: every record
//! written by the chosen sender comes out as an [`ExtractedMessage`], in
//! transcript order, with nothing merged, reordered or deduplicated.
//!
//! # Behavior Notes
//!
//! - Sender matching is exact and case-sensitive. `"alice"` does not match
//!   `"Alice"`, and neither matches `"Alice "`.
//! - Empty bodies are kept.
//! - An empty [`Extraction`] is a value, not an error. Call
//!   [`Extraction::require_non_empty`] when the caller needs one.
//!
//! # Example
//!
//! ```
//! use chatpluck::Transcript;
//! use chatpluck::core::{SenderCatalog, extract_checked};
//!
//! # fn main() -> chatpluck::Result<()> {
//! let transcript = Transcript::from_text(
//!     "1/1/24, 1:00 AM - Alice: one\n\
//!      1/1/24, 1:01 AM - Bob: two\n\
//!      1/1/24, 1:02 AM - Alice: three",
//! );
//! let catalog = SenderCatalog::from_transcript(&transcript);
//!
//! let extraction = extract_checked(&transcript, &catalog, "Bob")?;
//! assert_eq!(extraction.len(), 1);
//! assert_eq!(extraction.messages()[0].body(), "two");
//!
//! assert!(extract_checked(&transcript, &catalog, "Mallory").is_err());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::SenderCatalog;
use crate::error::{ChatpluckError, Result};
use crate::message::ExtractedMessage;
use crate::parsing::{Grammar, LegacyMatcher, classify_line};
use crate::transcript::Transcript;

/// The messages of one sender, in transcript order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    sender: String,
    grammar: Grammar,
    messages: Vec<ExtractedMessage>,
}

impl Extraction {
    /// Wraps already-extracted messages.
    pub fn new(sender: impl Into<String>, grammar: Grammar, messages: Vec<ExtractedMessage>) -> Self {
        Self {
            sender: sender.into(),
            grammar,
            messages,
        }
    }

    /// Returns the sender these messages belong to.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the grammar the transcript was read with.
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Returns the messages in transcript order.
    pub fn messages(&self) -> &[ExtractedMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the messages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedMessage> {
        self.messages.iter()
    }

    /// Maps an empty extraction to [`ChatpluckError::NoMessagesForSender`].
    pub fn require_non_empty(self) -> Result<Self> {
        if self.is_empty() {
            return Err(ChatpluckError::no_messages(self.sender));
        }
        Ok(self)
    }

    /// Joins the message bodies with newlines.
    ///
    /// This is the text sent for analysis: timestamps are left out.
    pub fn bodies_text(&self) -> String {
        self.messages
            .iter()
            .map(ExtractedMessage::body)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders `[<timestamp>] <body>` blocks separated by a blank line.
    pub fn to_document_text(&self) -> String {
        self.messages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a Extraction {
    type Item = &'a ExtractedMessage;
    type IntoIter = std::slice::Iter<'a, ExtractedMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Extracts every message written by `sender`.
///
/// Never fails: a sender with no records yields an empty [`Extraction`].
///
/// With [`Grammar::Legacy`] lines are matched on `" - <sender>:"` instead of
/// the timestamped grammar, which accepts more layouts but can misattribute
/// quoted text.
pub fn extract_messages(transcript: &Transcript, sender: &str, grammar: Grammar) -> Extraction {
    let messages: Vec<ExtractedMessage> = match grammar {
        Grammar::Timestamped => transcript
            .lines()
            .filter_map(classify_line)
            .filter(|record| record.is_from(sender))
            .map(ExtractedMessage::from)
            .collect(),
        Grammar::Legacy => {
            let matcher = LegacyMatcher::new(sender);
            transcript
                .lines()
                .filter_map(|line| matcher.matches(line))
                .map(ExtractedMessage::from)
                .collect()
        }
    };

    debug!(sender, %grammar, messages = messages.len(), "extracted messages");
    Extraction::new(sender, grammar, messages)
}

/// Checks `sender` against `catalog`, then extracts with the timestamped grammar.
///
/// # Errors
///
/// [`ChatpluckError::SenderNotInCatalog`] if the sender is not listed. The
/// transcript is not scanned in that case.
pub fn extract_checked(
    transcript: &Transcript,
    catalog: &SenderCatalog,
    sender: &str,
) -> Result<Extraction> {
    let sender = catalog.select(sender)?;
    Ok(extract_messages(transcript, sender, Grammar::Timestamped))
}
