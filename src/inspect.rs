//! Reading a rendered PDF back: metadata, outline and text lines.
//!
//! Only what this crate writes is understood: standard 14 fonts with
//! WinAnsiEncoding, one text object per line, a flat outline.

use std::collections::BTreeSet;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId};
use serde::Serialize;

use crate::encoding;
use crate::error::{Error, Result};

/// Text found on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectedPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// One entry per text object, top to bottom
    pub lines: Vec<String>,
}

/// What [`inspect_file`] and [`inspect_bytes`] report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub pdf_version: String,
    pub title: Option<String>,
    pub producer: Option<String>,
    /// Outline entry titles in order
    pub bookmarks: Vec<String>,
    pub pages: Vec<InspectedPage>,
}

impl Inspection {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text line of every page, in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter().map(String::as_str))
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

/// Inspect a PDF file on disk.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<Inspection> {
    let doc = lopdf::Document::load(path.as_ref())?;
    inspect_document(&doc)
}

/// Inspect a PDF held in memory.
pub fn inspect_bytes(data: &[u8]) -> Result<Inspection> {
    let doc = lopdf::Document::load_mem(data)?;
    inspect_document(&doc)
}

fn inspect_document(doc: &lopdf::Document) -> Result<Inspection> {
    let info = reference_dictionary(doc, &doc.trailer, b"Info");
    let catalog = reference_dictionary(doc, &doc.trailer, b"Root")
        .ok_or_else(|| Error::Pdf("missing document catalog".to_string()))?;

    let mut pages = Vec::new();
    for (number, page_id) in doc.get_pages() {
        let content = page_content(doc, page_id)?;
        pages.push(InspectedPage {
            number,
            lines: text_lines(&content)?,
        });
    }

    Ok(Inspection {
        pdf_version: doc.version.clone(),
        title: info.and_then(|dict| text_entry(dict, b"Title")),
        producer: info.and_then(|dict| text_entry(dict, b"Producer")),
        bookmarks: outline_titles(doc, catalog),
        pages,
    })
}

fn reference_dictionary<'a>(
    doc: &'a lopdf::Document,
    dict: &Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    let id = dict.get(key).ok()?.as_reference().ok()?;
    doc.get_dictionary(id).ok()
}

fn text_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

fn stream_data(doc: &lopdf::Document, id: ObjectId) -> Result<Vec<u8>> {
    match doc.get_object(id)? {
        Object::Stream(stream) if stream.dict.has(b"Filter") => Ok(stream.decompressed_content()?),
        Object::Stream(stream) => Ok(stream.content.clone()),
        _ => Err(Error::Pdf("invalid content stream".to_string())),
    }
}

fn page_content(doc: &lopdf::Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page = doc.get_dictionary(page_id)?;

    match page.get(b"Contents")? {
        Object::Reference(id) => stream_data(doc, *id),
        Object::Array(parts) => {
            let mut content = Vec::new();
            for part in parts {
                if let Object::Reference(id) = part {
                    content.extend_from_slice(&stream_data(doc, *id)?);
                    content.push(b' ');
                }
            }
            Ok(content)
        }
        _ => Err(Error::Pdf("invalid content stream".to_string())),
    }
}

/// One string per `BT`..`ET` block, runs concatenated.
fn text_lines(content: &[u8]) -> Result<Vec<String>> {
    let content = Content::decode(content)?;
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => current = Some(String::new()),
            "ET" => {
                if let Some(line) = current.take().filter(|line| !line.is_empty()) {
                    lines.push(line);
                }
            }
            "Tj" | "'" | "\"" => {
                if let (Some(line), Some(Object::String(bytes, _))) =
                    (current.as_mut(), op.operands.last())
                {
                    line.push_str(&encoding::decode(bytes));
                }
            }
            "TJ" => {
                if let (Some(line), Some(Object::Array(parts))) =
                    (current.as_mut(), op.operands.first())
                {
                    for part in parts {
                        if let Object::String(bytes, _) = part {
                            line.push_str(&encoding::decode(bytes));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(lines)
}

/// Titles of the top-level outline entries, following `Next` links.
fn outline_titles(doc: &lopdf::Document, catalog: &Dictionary) -> Vec<String> {
    let mut titles = Vec::new();
    let Some(outlines) = reference_dictionary(doc, catalog, b"Outlines") else {
        return titles;
    };

    let mut seen = BTreeSet::new();
    let mut next = outlines.get(b"First").and_then(Object::as_reference).ok();
    while let Some(id) = next {
        if !seen.insert(id) {
            log::warn!("outline loops back to object {:?}", id);
            break;
        }
        let Ok(item) = doc.get_dictionary(id) else {
            break;
        };
        if let Some(title) = text_entry(item, b"Title") {
            titles.push(title);
        }
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }
    titles
}
