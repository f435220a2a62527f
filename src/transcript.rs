//! Loaded chat transcripts.
//!
//! A [`Transcript`] is the ordered, read-only list of lines from one export.
//! Both the sender catalog and the extractor borrow it, so it can be scanned
//! any number of times without re-reading the file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{ChatpluckError, Result};
use crate::message::ChatRecord;
use crate::parsing::classify_line;

/// The lines of one chat export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
    path: Option<PathBuf>,
}

impl Transcript {
    /// Reads a UTF-8 transcript from disk.
    ///
    /// A missing or unreadable file is [`ChatpluckError::InputNotFound`];
    /// invalid UTF-8 is [`ChatpluckError::Utf8`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use chatpluck::Transcript;
    ///
    /// let transcript = Transcript::from_path("messages.txt")?;
    /// println!("{} lines", transcript.len());
    /// # Ok::<(), chatpluck::ChatpluckError>(())
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ChatpluckError::input_not_found(path, e))?;
        let text = String::from_utf8(bytes).map_err(|e| ChatpluckError::Utf8 {
            context: path.display().to_string(),
            source: e,
        })?;

        let mut transcript = Self::from_text(&text);
        transcript.path = Some(path.to_path_buf());
        debug!(path = %path.display(), lines = transcript.len(), "loaded transcript");
        Ok(transcript)
    }

    /// Builds a transcript from in-memory text.
    ///
    /// Lines are split on `\n` and a trailing `\r` is dropped, so CRLF
    /// exports behave like LF ones. A leading byte-order mark is ignored.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().map(str::to_owned).collect(),
            path: None,
        }
    }

    /// Returns the file this transcript was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the transcript has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the raw lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Iterates over the lines that are chat records, in order.
    ///
    /// Non-record lines are skipped; each skipped non-blank line is logged at
    /// `trace` level with its 1-based line number.
    pub fn records(&self) -> impl Iterator<Item = ChatRecord> + '_ {
        self.lines.iter().enumerate().filter_map(|(idx, line)| {
            let record = classify_line(line);
            if record.is_none() && !line.trim().is_empty() {
                trace!(line = idx + 1, "skipping non-record line");
            }
            record
        })
    }
}

impl From<&str> for Transcript {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_text_splits_lines() {
        let t = Transcript::from_text("a\nb\r\nc");
        assert_eq!(t.lines().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(t.len(), 3);
        assert!(t.path().is_none());
    }

    #[test]
    fn test_bom_is_ignored() {
        let t = Transcript::from_text("\u{feff}1/1/24, 1:00 AM - Alice: hi");
        assert_eq!(t.records().count(), 1);
    }

    #[test]
    fn test_crlf_records_parse() {
        let t = Transcript::from_text("1/1/24, 1:00 AM - Alice: hi\r\n1/1/24, 1:01 AM - Bob: yo\r\n");
        let records: Vec<_> = t.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].body, "hi");
        assert_eq!(records[1].body, "yo");
    }

    #[test]
    fn test_records_skip_noise() {
        let t = Transcript::from_text(
            "Messages are encrypted\n\n1/1/24, 1:00 AM - Alice: hi\ncontinued line",
        );
        let records: Vec<_> = t.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender, "Alice");
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1/1/24, 1:00 AM - Alice: hi").unwrap();

        let t = Transcript::from_path(file.path()).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.path(), Some(file.path()));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Transcript::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(err.is_input_not_found());
    }

    #[test]
    fn test_from_path_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = Transcript::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ChatpluckError::Utf8 { .. }));
    }

    #[test]
    fn test_empty_transcript() {
        let t = Transcript::from_text("");
        assert!(t.is_empty());
        assert_eq!(t.records().count(), 0);
    }
}
