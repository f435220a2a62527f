//! Record types produced by the line classifier and the extractor.
//!
//! - [`ChatRecord`] is one classified transcript line: timestamp, sender, body.
//! - [`ExtractedMessage`] is the sender-free projection handed to export and
//!   analysis.
//!
//! Timestamps stay as the text that appeared in the export. They are only
//! displayed, never compared as dates, so no calendar parsing happens here.
//!
//! # Example
//!
//! ```
//! use chatpluck::{ChatRecord, ExtractedMessage};
//!
//! let record = ChatRecord::new("12/5/24, 9:41 PM", "Alice", "Hello there");
//! let msg = ExtractedMessage::from(record);
//!
//! assert_eq!(msg.timestamp(), "12/5/24, 9:41 PM");
//! assert_eq!(msg.body(), "Hello there");
//! assert_eq!(msg.to_string(), "[12/5/24, 9:41 PM] Hello there");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One transcript line that matched the record grammar.
///
/// Built by [`classify_line`](crate::parsing::classify_line); immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Timestamp exactly as written in the export (e.g. `12/5/24, 9:41 PM`).
    pub timestamp: String,

    /// Display name of the author, as it appears between ` - ` and `: `.
    pub sender: String,

    /// Everything after the first `": "` that follows the sender.
    ///
    /// May be empty and may itself contain colons.
    pub body: String,
}

impl ChatRecord {
    /// Creates a new record.
    pub fn new(
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Returns the raw timestamp text.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if this record was written by `sender` (exact match).
    pub fn is_from(&self, sender: &str) -> bool {
        self.sender == sender
    }
}

/// A message that belongs to the extracted sender.
///
/// The sender itself is carried once by [`Extraction`](crate::core::Extraction)
/// instead of being repeated on every message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedMessage {
    /// Timestamp exactly as written in the export.
    pub timestamp: String,

    /// Message body, possibly empty.
    pub body: String,
}

impl ExtractedMessage {
    /// Creates a new extracted message.
    pub fn new(timestamp: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            body: body.into(),
        }
    }

    /// Returns the raw timestamp text.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if the body is empty or whitespace-only.
    ///
    /// Such messages are still kept by the extractor (media placeholders
    /// often export as empty bodies).
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

impl From<ChatRecord> for ExtractedMessage {
    fn from(record: ChatRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            body: record.body,
        }
    }
}

/// Renders the `[<timestamp>] <body>` block used in exported documents.
impl fmt::Display for ExtractedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.body)
    }
}
