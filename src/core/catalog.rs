//! Sender discovery.
//!
//! [`SenderCatalog`] lists every distinct sender of a transcript in the order
//! they first appear. It is what the operator picks from, and it is the
//! membership check the extractor runs before anything is extracted.
//!
//! # Example
//!
//! ```
//! use chatpluck::Transcript;
//! use chatpluck::core::SenderCatalog;
//!
//! let transcript = Transcript::from_text(
//!     "1/1/24, 1:00 AM - Bob: hi\n\
//!      1/1/24, 1:01 AM - Alice: hey\n\
//!      1/1/24, 1:02 AM - Bob: how are you?",
//! );
//!
//! let catalog = SenderCatalog::from_transcript(&transcript);
//! assert_eq!(catalog.senders(), ["Bob", "Alice"]);
//! assert_eq!(catalog.select_index(2)?, "Alice");
//! assert!(catalog.select("Mallory").is_err());
//! # Ok::<(), chatpluck::ChatpluckError>(())
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatpluckError, Result};
use crate::transcript::Transcript;

/// Distinct senders of a transcript, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCatalog {
    senders: Vec<String>,
}

impl SenderCatalog {
    /// Scans `transcript` and collects its senders.
    ///
    /// An export without a single record yields an empty catalog, not an
    /// error. Use [`require_non_empty`](Self::require_non_empty) to turn that
    /// into [`ChatpluckError::NoSendersFound`].
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let mut seen = HashSet::new();
        let mut senders = Vec::new();

        for record in transcript.records() {
            if seen.insert(record.sender.clone()) {
                senders.push(record.sender);
            }
        }

        debug!(senders = senders.len(), "built sender catalog");
        Self { senders }
    }

    /// Returns the senders in first-seen order.
    pub fn senders(&self) -> &[String] {
        &self.senders
    }

    /// Returns the number of distinct senders.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Returns `true` if the transcript had no records.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Returns `true` if `sender` appears in the catalog (exact match).
    pub fn contains(&self, sender: &str) -> bool {
        self.senders.iter().any(|s| s == sender)
    }

    /// Returns `(1-based index, sender, record count)` rows for display.
    pub fn numbered(&self, transcript: &Transcript) -> Vec<(usize, &str, usize)> {
        self.senders
            .iter()
            .zip(self.message_counts(transcript))
            .enumerate()
            .map(|(i, (sender, (_, count)))| (i + 1, sender.as_str(), count))
            .collect()
    }

    /// Maps an empty catalog to [`ChatpluckError::NoSendersFound`].
    pub fn require_non_empty(self, transcript: &Transcript) -> Result<Self> {
        if self.is_empty() {
            return Err(ChatpluckError::NoSendersFound {
                path: transcript.path().map(Into::into),
            });
        }
        Ok(self)
    }

    /// Selects a sender by exact name.
    ///
    /// # Errors
    ///
    /// [`ChatpluckError::SenderNotInCatalog`] if the name is not listed.
    pub fn select(&self, sender: &str) -> Result<&str> {
        self.senders
            .iter()
            .find(|s| *s == sender)
            .map(String::as_str)
            .ok_or_else(|| ChatpluckError::sender_not_in_catalog(sender))
    }

    /// Selects a sender by its 1-based display index.
    ///
    /// # Errors
    ///
    /// [`ChatpluckError::InvalidSelection`] if `index` is out of range.
    pub fn select_index(&self, index: usize) -> Result<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.senders.get(i))
            .map(String::as_str)
            .ok_or_else(|| ChatpluckError::InvalidSelection {
                input: index.to_string(),
                max: self.senders.len(),
            })
    }

    /// Resolves operator input: a number picks by index, anything else by name.
    ///
    /// The input is matched as typed first, then trimmed, so a sender exported
    /// with surrounding whitespace can still be picked by name. A sender whose
    /// name is literally a number wins over the index interpretation when it
    /// is listed.
    pub fn resolve(&self, input: &str) -> Result<&str> {
        if let Ok(name) = self.select(input) {
            return Ok(name);
        }
        let input = input.trim();
        if let Ok(name) = self.select(input) {
            return Ok(name);
        }
        match input.parse::<usize>() {
            Ok(index) => self.select_index(index).map_err(|_| ChatpluckError::InvalidSelection {
                input: input.to_string(),
                max: self.senders.len(),
            }),
            Err(_) => Err(ChatpluckError::sender_not_in_catalog(input)),
        }
    }

    /// Counts the records of each sender, in catalog order.
    pub fn message_counts(&self, transcript: &Transcript) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in transcript.records() {
            *counts.entry(record.sender).or_default() += 1;
        }

        self.senders
            .iter()
            .map(|s| (s.clone(), counts.get(s).copied().unwrap_or(0)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SenderCatalog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.senders.iter()
    }
}
