//! Line classification grammar.
//!
//! A transcript line is a chat record when it looks like
//!
//! ```text
//! 12/5/24, 9:41 PM - Alice: Hello there
//! <timestamp>      - <sender>: <body>
//! ```
//!
//! - timestamp: `D{1,2}/D{1,2}/D{2,4}, H{1,2}:MM`, optionally followed by an
//!   AM/PM marker built only from the letters `A`, `P`, `M` (with or without
//!   a separating space). Kept verbatim, never validated as a date.
//! - sender: the shortest non-empty text up to the first `": "`. A display
//!   name that itself contains `": "` is cut at that point and the rest lands
//!   in the body.
//! - body: the rest of the line, which may be empty and may contain colons.
//!
//! Anything else (system notices, wrapped continuation lines, blank lines) is
//! not a record and is skipped.
//!
//! The [`Grammar::Legacy`] form is kept for old exports only. It matches on
//! the substring `" - <sender>:"`, so it needs the sender up front and it
//! misattributes a line whose body quotes `" - <sender>:"`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::message::ChatRecord;

/// Regex for the timestamped record form.
///
/// Digits are spelled `[0-9]` because `\d` would also accept non-ASCII
/// decimal digits.
pub const TIMESTAMPED_PATTERN: &str =
    r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}, [0-9]{1,2}:[0-9]{2}(?: ?[APM]+)?) - (.+?): (.*)$";

static TIMESTAMPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIMESTAMPED_PATTERN).expect("timestamped pattern is valid"));

/// Which record form the classifier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// `<timestamp> - <sender>: <body>`, matched with [`TIMESTAMPED_PATTERN`].
    #[default]
    Timestamped,

    /// Substring match on `" - <sender>:"`. Deprecated.
    Legacy,
}

impl Grammar {
    /// Returns all grammar names.
    pub fn all_names() -> &'static [&'static str] {
        &["timestamped", "strict", "legacy"]
    }

    /// Returns `true` if this grammar can discover senders on its own.
    ///
    /// The legacy form only recognises lines for a sender it is given.
    pub fn discovers_senders(self) -> bool {
        matches!(self, Grammar::Timestamped)
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grammar::Timestamped => write!(f, "timestamped"),
            Grammar::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for Grammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timestamped" | "strict" => Ok(Grammar::Timestamped),
            "legacy" => Ok(Grammar::Legacy),
            _ => Err(format!(
                "Unknown grammar: '{}'. Expected one of: {}",
                s,
                Grammar::all_names().join(", ")
            )),
        }
    }
}

/// Classifies one line with the timestamped grammar.
///
/// Returns `None` for lines that are not chat records. That is the normal
/// outcome for system notices and blank lines, not an error.
///
/// # Example
///
/// ```
/// use chatpluck::parsing::classify_line;
///
/// let record = classify_line("1/1/24, 1:00 AM - Alice: He said: hi").unwrap();
/// assert_eq!(record.timestamp, "1/1/24, 1:00 AM");
/// assert_eq!(record.sender, "Alice");
/// assert_eq!(record.body, "He said: hi");
///
/// assert!(classify_line("System message: Alice joined").is_none());
/// ```
pub fn classify_line(line: &str) -> Option<ChatRecord> {
    let caps = TIMESTAMPED.captures(line)?;
    Some(ChatRecord::new(
        caps.get(1).map_or("", |m| m.as_str()),
        caps.get(2).map_or("", |m| m.as_str()),
        caps.get(3).map_or("", |m| m.as_str()),
    ))
}

/// Returns `true` if `line` is a record under the timestamped grammar.
pub fn is_record(line: &str) -> bool {
    TIMESTAMPED.is_match(line)
}

/// Matcher for the legacy `" - <sender>:"` form, bound to one sender.
///
/// The markers are built once so scanning a transcript does not allocate per
/// line.
#[derive(Debug, Clone)]
pub struct LegacyMatcher {
    marker: String,
    tag: String,
    sender: String,
}

impl LegacyMatcher {
    /// Creates a matcher for `sender`.
    pub fn new(sender: &str) -> Self {
        Self {
            marker: format!(" - {sender}:"),
            tag: format!("{sender}:"),
            sender: sender.to_string(),
        }
    }

    /// Classifies `line` for the bound sender.
    ///
    /// The body is everything after the first `"<sender>:"`, trimmed. The
    /// timestamp is whatever precedes the first `" - <sender>:"`, trimmed.
    pub fn matches(&self, line: &str) -> Option<ChatRecord> {
        if self.sender.is_empty() {
            return None;
        }
        let marker_at = line.find(&self.marker)?;
        let body_at = line.find(&self.tag)? + self.tag.len();

        Some(ChatRecord::new(
            line[..marker_at].trim(),
            self.sender.as_str(),
            line[body_at..].trim(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_basic_pm_line() {
        let record = classify_line("12/5/24, 9:41 PM - Alice: Hello there").unwrap();
        assert_eq!(record, ChatRecord::new("12/5/24, 9:41 PM", "Alice", "Hello there"));
    }

    #[test]
    fn test_system_notice_is_not_a_record() {
        assert!(classify_line("System message: Alice joined").is_none());
        assert!(!is_record("System message: Alice joined"));
    }

    #[test]
    fn test_body_keeps_embedded_colons() {
        let record = classify_line("1/1/24, 1:00 AM - Alice: He said: hi").unwrap();
        assert_eq!(record.sender, "Alice");
        assert_eq!(record.body, "He said: hi");

        let record = classify_line("1/1/24, 1:00 AM - Alice: see 10:30: ok").unwrap();
        assert_eq!(record.body, "see 10:30: ok");
    }

    #[test]
    fn test_sender_with_colon_space_is_truncated() {
        let record = classify_line("1/1/24, 1:00 AM - Dr: Who: hello").unwrap();
        assert_eq!(record.sender, "Dr");
        assert_eq!(record.body, "Who: hello");
    }

    #[test]
    fn test_sender_with_bare_colon_is_kept() {
        let record = classify_line("1/1/24, 1:00 AM - Team:A: go").unwrap();
        assert_eq!(record.sender, "Team:A");
        assert_eq!(record.body, "go");
    }

    #[test]
    fn test_twenty_four_hour_clock() {
        let record = classify_line("15/01/2024, 21:07 - Иван: Привет").unwrap();
        assert_eq!(record.timestamp, "15/01/2024, 21:07");
        assert_eq!(record.sender, "Иван");
        assert_eq!(record.body, "Привет");
    }

    #[test]
    fn test_marker_without_space() {
        let record = classify_line("3/4/23, 7:05AM - Bob: early").unwrap();
        assert_eq!(record.timestamp, "3/4/23, 7:05AM");
    }

    #[test]
    fn test_empty_body_is_a_record() {
        let record = classify_line("3/4/23, 7:05 AM - Bob: ").unwrap();
        assert_eq!(record.sender, "Bob");
        assert_eq!(record.body, "");
    }

    #[test]
    fn test_missing_colon_space_is_not_a_record() {
        assert!(classify_line("3/4/23, 7:05 AM - Bob:hi").is_none());
        assert!(classify_line("3/4/23, 7:05 AM - Bob changed the subject").is_none());
        assert!(classify_line("3/4/23, 7:05 AM - : hi").is_none());
    }

    #[test]
    fn test_other_layouts_are_not_records() {
        // iOS bracketed export
        assert!(classify_line("[1/15/24, 10:30:45 AM] Alice: Hello").is_none());
        // dotted dates
        assert!(classify_line("15.01.2024, 10:30 - Alice: Hello").is_none());
        // lowercase marker
        assert!(classify_line("1/15/24, 10:30 pm - Alice: Hello").is_none());
        // leading whitespace
        assert!(classify_line(" 1/15/24, 10:30 - Alice: Hello").is_none());
        // three digit day
        assert!(classify_line("123/1/24, 10:30 - Alice: Hello").is_none());
        // non-ASCII digits
        assert!(classify_line("١/١/٢٤, ١:٠٠ - Alice: Hello").is_none());
        assert!(classify_line("").is_none());
    }

    #[test]
    fn test_legacy_matcher() {
        let matcher = LegacyMatcher::new("Alice");
        let record = matcher
            .matches("12/5/24, 9:41 PM - Alice:   Hello there  ")
            .unwrap();
        assert_eq!(record.timestamp, "12/5/24, 9:41 PM");
        assert_eq!(record.sender, "Alice");
        assert_eq!(record.body, "Hello there");

        assert!(matcher.matches("12/5/24, 9:41 PM - Bob: Hello").is_none());
    }

    #[test]
    fn test_legacy_accepts_lines_strict_rejects() {
        let line = "[1/15/24 10:30] - Alice:hi";
        assert!(classify_line(line).is_none());
        let record = LegacyMatcher::new("Alice").matches(line).unwrap();
        assert_eq!(record.timestamp, "[1/15/24 10:30]");
        assert_eq!(record.body, "hi");
    }

    #[test]
    fn test_legacy_false_positive_is_documented_behavior() {
        // Bob quotes Alice; the legacy form attributes the line to Alice.
        let line = "1/1/24, 1:00 AM - Bob: she wrote - Alice: hi";
        let record = LegacyMatcher::new("Alice").matches(line).unwrap();
        assert_eq!(record.body, "hi");
        assert!(!classify_line(line).unwrap().is_from("Alice"));
    }

    #[test]
    fn test_legacy_empty_sender_matches_nothing() {
        assert!(LegacyMatcher::new("").matches("1/1/24, 1:00 AM - : hi").is_none());
    }

    #[test]
    fn test_grammar_from_str() {
        assert_eq!("strict".parse::<Grammar>().unwrap(), Grammar::Timestamped);
        assert_eq!("LEGACY".parse::<Grammar>().unwrap(), Grammar::Legacy);
        assert!("fuzzy".parse::<Grammar>().is_err());
        assert_eq!(Grammar::default(), Grammar::Timestamped);
        assert!(Grammar::Timestamped.discovers_senders());
        assert!(!Grammar::Legacy.discovers_senders());
    }
}
