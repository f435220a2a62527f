//! OpenDocument Text writer.
//!
//! Produces a minimal but valid `.odt` package:
//!
//! | Entry | Notes |
//! |-------|-------|
//! | `mimetype` | first entry, stored uncompressed |
//! | `META-INF/manifest.xml` | lists the other entries |
//! | `content.xml` | title, headings and paragraphs |
//! | `styles.xml` | paragraph styles used by `content.xml` |
//! | `meta.xml` | generator and creation date |

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::Utc;
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{Block, Document};
use crate::error::{ChatpluckError, ExportErrorKind, Result};

const MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

const MANIFEST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.text"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
 <manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml"/>
 <manifest:file-entry manifest:full-path="meta.xml" manifest:media-type="text/xml"/>
</manifest:manifest>
"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" office:version="1.2">
 <office:styles>
  <style:default-style style:family="paragraph">
   <style:text-properties style:font-name="Liberation Sans" fo:font-size="11pt"/>
  </style:default-style>
  <style:style style:name="Standard" style:family="paragraph">
   <style:paragraph-properties fo:margin-bottom="0.25cm"/>
  </style:style>
  <style:style style:name="Title" style:family="paragraph" style:parent-style-name="Standard">
   <style:paragraph-properties fo:text-align="center" fo:margin-bottom="0.5cm"/>
   <style:text-properties fo:font-size="18pt" fo:font-weight="bold"/>
  </style:style>
  <style:style style:name="Heading_20_1" style:display-name="Heading 1" style:family="paragraph" style:parent-style-name="Standard">
   <style:paragraph-properties fo:margin-top="0.5cm"/>
   <style:text-properties fo:font-size="14pt" fo:font-weight="bold"/>
  </style:style>
 </office:styles>
</office:document-styles>
"#;

/// Writes `doc` as an `.odt` file.
pub fn write_odt(doc: &Document, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let bytes = to_odt(doc)?;
    fs::write(output_path, &bytes).map_err(|e| ChatpluckError::export("ODT", e))?;
    debug!(path = %output_path.display(), bytes = bytes.len(), "wrote ODT");
    Ok(())
}

/// Renders `doc` as `.odt` bytes.
pub fn to_odt(doc: &Document) -> Result<Vec<u8>> {
    build_package(doc).map_err(|e| ChatpluckError::export("ODT", e))
}

fn build_package(doc: &Document) -> std::result::Result<Vec<u8>, ExportErrorKind> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // Must be the first entry, uncompressed, for mimetype sniffing.
    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    zip.start_file("META-INF/manifest.xml", deflated)?;
    zip.write_all(MANIFEST_XML.as_bytes())?;

    zip.start_file("content.xml", deflated)?;
    zip.write_all(content_xml(doc).as_bytes())?;

    zip.start_file("styles.xml", deflated)?;
    zip.write_all(STYLES_XML.as_bytes())?;

    zip.start_file("meta.xml", deflated)?;
    zip.write_all(meta_xml(doc).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn content_xml(doc: &Document) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:version="1.2">
 <office:body>
  <office:text>
"#,
    );

    for block in doc.blocks() {
        match block {
            Block::Title(t) => {
                xml.push_str(&format!(
                    "   <text:p text:style-name=\"Title\">{}</text:p>\n",
                    escape_text(t)
                ));
            }
            Block::Heading(t) => {
                xml.push_str(&format!(
                    "   <text:h text:style-name=\"Heading_20_1\" text:outline-level=\"1\">{}</text:h>\n",
                    escape_text(t)
                ));
            }
            Block::Paragraph(t) => {
                for line in t.split('\n') {
                    xml.push_str(&format!(
                        "   <text:p text:style-name=\"Standard\">{}</text:p>\n",
                        escape_text(line)
                    ));
                }
            }
        }
    }

    xml.push_str("  </office:text>\n </office:body>\n</office:document-content>\n");
    xml
}

fn meta_xml(doc: &Document) -> String {
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%S");
    let title = doc.title().map(escape_text).unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" xmlns:dc="http://purl.org/dc/elements/1.1/" office:version="1.2">
 <office:meta>
  <meta:generator>chatpluck/{}</meta:generator>
  <dc:title>{}</dc:title>
  <meta:creation-date>{}</meta:creation-date>
 </office:meta>
</office:document-meta>
"#,
        env!("CARGO_PKG_VERSION"),
        title,
        created
    )
}

/// Escapes text for an ODF paragraph.
///
/// ODF collapses whitespace, so tabs become `<text:tab/>` and every space
/// after the first in a run (or a leading space) becomes `<text:s/>`.
/// Characters XML 1.0 forbids are dropped.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_spaces = 0usize;
    let mut at_start = true;

    for c in text.chars() {
        if c == ' ' {
            pending_spaces += 1;
            continue;
        }
        flush(&mut out, &mut pending_spaces, at_start);
        at_start = false;

        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("<text:tab/>"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    flush(&mut out, &mut pending_spaces, at_start);
    out
}

fn flush(out: &mut String, spaces: &mut usize, at_start: bool) {
    if *spaces == 0 {
        return;
    }
    let mut extra = *spaces;
    if !at_start {
        out.push(' ');
        extra -= 1;
    }
    if extra == 1 {
        out.push_str("<text:s/>");
    } else if extra > 1 {
        out.push_str(&format!("<text:s text:c=\"{extra}\"/>"));
    }
    *spaces = 0;
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}
