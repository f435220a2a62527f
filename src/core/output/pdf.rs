//! PDF writer.
//!
//! A4 pages, builtin Helvetica, greedy word wrap. A new page starts whenever
//! the cursor reaches the bottom margin.
//!
//! Builtin fonts are WinAnsi-encoded; characters outside that set are written
//! as `?`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::debug;

use super::{Block, Document};
use crate::error::{ChatpluckError, ExportErrorKind, Result};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_LEFT: Mm = Mm(20.0);
const TOP: Mm = Mm(280.0);
const BOTTOM: f32 = 20.0;

const BODY_SIZE: f32 = 10.0;
const BODY_LINE: Mm = Mm(5.0);
const BODY_WRAP: usize = 90;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 13.0;
const HEADING_WRAP: usize = 60;

/// Writes `doc` as a `.pdf` file.
pub fn write_pdf(doc: &Document, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let (pdf, pages) = render(doc).map_err(|e| ChatpluckError::export("PDF", e))?;
    let file = File::create(output_path).map_err(|e| ChatpluckError::export("PDF", e))?;
    pdf.save(&mut BufWriter::new(file))
        .map_err(|e| ChatpluckError::export("PDF", ExportErrorKind::Pdf(e.to_string())))?;
    debug!(path = %output_path.display(), pages, "wrote PDF");
    Ok(())
}

/// Renders `doc` as `.pdf` bytes.
pub fn to_pdf(doc: &Document) -> Result<Vec<u8>> {
    let (pdf, _) = render(doc).map_err(|e| ChatpluckError::export("PDF", e))?;
    let mut buf = BufWriter::new(Vec::new());
    pdf.save(&mut buf)
        .map_err(|e| ChatpluckError::export("PDF", ExportErrorKind::Pdf(e.to_string())))?;
    buf.into_inner()
        .map_err(|e| ChatpluckError::export("PDF", e.into_error()))
}

/// Tracks the current page, layer and vertical position.
struct PageCursor<'a> {
    pdf: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
    pages: usize,
}

impl PageCursor<'_> {
    fn line(&mut self, text: &str, size: f32, advance: Mm, font: &IndirectFontRef) {
        if self.y.0 < BOTTOM {
            let (page, layer) = self.pdf.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.pdf.get_page(page).get_layer(layer);
            self.y = TOP;
            self.pages += 1;
        }
        self.layer.use_text(winansi(text), size, MARGIN_LEFT, self.y, font);
        self.y = Mm(self.y.0 - advance.0);
    }

    fn gap(&mut self, space: Mm) {
        self.y = Mm(self.y.0 - space.0);
    }
}

fn render(doc: &Document) -> std::result::Result<(PdfDocumentReference, usize), ExportErrorKind> {
    let title = doc.title().unwrap_or("Messages");
    let (pdf, page1, layer1) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportErrorKind::Pdf(format!("font error: {e}")))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportErrorKind::Pdf(format!("font error: {e}")))?;

    let pages = {
        let mut cursor = PageCursor {
            pdf: &pdf,
            layer: pdf.get_page(page1).get_layer(layer1),
            y: TOP,
            pages: 1,
        };

        for block in doc.blocks() {
            match block {
                Block::Title(t) => {
                    for line in wrap_text(t, HEADING_WRAP) {
                        cursor.line(&line, TITLE_SIZE, Mm(8.0), &bold);
                    }
                    cursor.gap(Mm(4.0));
                }
                Block::Heading(t) => {
                    cursor.gap(Mm(4.0));
                    for line in wrap_text(t, HEADING_WRAP) {
                        cursor.line(&line, HEADING_SIZE, Mm(7.0), &bold);
                    }
                    cursor.gap(Mm(2.0));
                }
                Block::Paragraph(t) => {
                    for source_line in t.split('\n') {
                        for line in wrap_text(source_line, BODY_WRAP) {
                            cursor.line(&line, BODY_SIZE, BODY_LINE, &font);
                        }
                    }
                    cursor.gap(Mm(3.0));
                }
            }
        }
        cursor.pages
    };

    Ok((pdf, pages))
}

/// Greedy word wrap on whitespace. Words longer than `max_chars` are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(max_chars.max(1)) {
            let chunk_len = chunk.len();
            if current_len + chunk_len + 1 > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.extend(chunk);
            current_len += chunk_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F.
const WINANSI_HIGH: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Keeps characters the builtin fonts can encode. Tabs become spaces.
fn winansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c,
            '\t' => ' ',
            c if WINANSI_HIGH.contains(&c) => c,
            _ => '?',
        })
        .collect()
}
