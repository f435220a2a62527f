//! Document writers.
//!
//! An [`Extraction`] (plus an optional analysis) is first laid out as a
//! [`Document`], a flat list of [`Block`]s. The writers only know about
//! blocks:
//! - [`write_odt`] / [`to_odt`] - OpenDocument Text - requires `odt` feature
//! - [`write_pdf`] / [`to_pdf`] - A4 PDF with builtin Helvetica - requires `pdf` feature
//!
//! # Layout
//!
//! ```text
//! Messages from Alice            <- title
//!
//! [1/1/24, 1:00 AM] first        <- one paragraph per message
//!
//! [1/1/24, 1:02 AM] last
//!
//! Personality Analysis           <- only when an analysis is attached
//!
//! ...analysis text...
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "odt", feature = "pdf"))]
//! # fn main() -> chatpluck::Result<()> {
//! use chatpluck::Transcript;
//! use chatpluck::core::output::{Document, write_odt, write_pdf};
//! use chatpluck::core::extract_messages;
//! use chatpluck::parsing::Grammar;
//!
//! let transcript = Transcript::from_path("messages.txt")?;
//! let extraction = extract_messages(&transcript, "Alice", Grammar::Timestamped);
//! let doc = Document::from_extraction(&extraction, None);
//!
//! write_odt(&doc, "alice.odt")?;
//! write_pdf(&doc, "alice.pdf")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "odt", feature = "pdf")))]
//! # fn main() {}
//! ```

#[cfg(feature = "odt")]
mod odt;
#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "odt")]
pub use odt::{to_odt, write_odt};
#[cfg(feature = "pdf")]
pub use pdf::{to_pdf, write_pdf};

use serde::{Deserialize, Serialize};

use crate::core::extractor::Extraction;

/// Heading placed above the analysis text.
pub const ANALYSIS_HEADING: &str = "Personality Analysis";

/// One unit of document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Block {
    /// Document title, rendered once at the top.
    Title(String),
    /// Section heading.
    Heading(String),
    /// Body paragraph. Rendered on its own line(s), followed by a gap.
    Paragraph(String),
}

impl Block {
    /// Returns the block text.
    pub fn text(&self) -> &str {
        match self {
            Block::Title(t) | Block::Heading(t) | Block::Paragraph(t) => t,
        }
    }
}

/// A rendered-format-independent document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out an extraction, optionally followed by an analysis section.
    ///
    /// Each message becomes one `[<timestamp>] <body>` paragraph. The
    /// analysis is split into paragraphs on blank lines.
    pub fn from_extraction(extraction: &Extraction, analysis: Option<&str>) -> Self {
        let mut doc = Self::new().with_block(Block::Title(format!(
            "Messages from {}",
            extraction.sender()
        )));

        for msg in extraction {
            doc.push(Block::Paragraph(msg.to_string()));
        }

        if let Some(analysis) = analysis.map(str::trim).filter(|a| !a.is_empty()) {
            doc.push(Block::Heading(ANALYSIS_HEADING.to_string()));
            for para in split_paragraphs(analysis) {
                doc.push(Block::Paragraph(para));
            }
        }

        doc
    }

    /// Appends a block.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends a block in place.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Returns the blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the title, if the document has one.
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Returns the document as plain text, blocks separated by a blank line.
    pub fn to_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Splits text into paragraphs on blank lines, joining wrapped lines.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}
