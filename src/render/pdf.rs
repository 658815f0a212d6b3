//! PDF serialization of a laid-out document.
//!
//! Fonts are the standard 14 Type1 faces with `/WinAnsiEncoding`, so no font
//! program is embedded. Object numbers are allocated in a fixed order and
//! nothing time-dependent is written unless a creation date is requested,
//! which keeps repeated renders byte-identical.

use std::collections::BTreeMap;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};

use super::RenderOptions;
use crate::encoding;
use crate::error::{Error, Result};
use crate::layout::{Bookmark, BuiltinFont, LaidOutPage, Layout, PlacedItem, PlacedLine, PlacedRect};
use crate::model::{Color, Document};

const PDF_VERSION: &str = "1.4";

/// Serialize `layout` into a complete PDF file.
pub(super) fn write_pdf(doc: &Document, layout: &Layout, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut pdf = lopdf::Document::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();

    let fonts = layout.fonts();
    let mut font_dict = Dictionary::new();
    for font in &fonts {
        let id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(font.resource_name(), id);
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => font_dict,
        "ProcSet" => vec![Object::Name(b"PDF".to_vec()), Object::Name(b"Text".to_vec())],
    });

    let size = layout.geometry.size;
    let mut page_ids = Vec::with_capacity(layout.page_count());
    for page in &layout.pages {
        let content = page_content(page)?;
        let stream = content_stream(content, options.compress)?;
        let content_id = pdf.add_object(stream);
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|&id| Object::Reference(id)).collect::<Vec<_>>(),
        "Count" => page_ids.len() as i64,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), number(size.width), number(size.height)],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if let Some(outlines_id) = write_outline(&mut pdf, &layout.bookmarks, &page_ids) {
        catalog.set("Outlines", outlines_id);
        catalog.set("PageMode", "UseOutlines");
    }
    let catalog_id = pdf.add_object(catalog);
    let info_id = pdf.add_object(info_dictionary(doc, options));

    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)?;

    log::debug!(
        "serialized {} page(s), {} font(s), {} bookmark(s) into {} bytes",
        page_ids.len(),
        fonts.len(),
        layout.bookmarks.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Round to hundredths of a point so coordinates print compactly.
fn number(value: f32) -> Object {
    Object::Real((value * 100.0).round() / 100.0)
}

fn color_operation(operator: &str, color: Color) -> Operation {
    let [r, g, b] = color.components();
    Operation::new(operator, vec![number(r), number(g), number(b)])
}

fn page_content(page: &LaidOutPage) -> Result<Vec<u8>> {
    let mut operations = Vec::new();
    for item in &page.items {
        match item {
            PlacedItem::Rect(rect) => rect_operations(rect, &mut operations),
            PlacedItem::Line(line) => line_operations(line, &mut operations)?,
        }
    }
    Content { operations }
        .encode()
        .map_err(|e| Error::Pdf(format!("content stream encoding failed: {}", e)))
}

fn rect_operations(rect: &PlacedRect, operations: &mut Vec<Operation>) {
    operations.push(Operation::new("q", vec![]));
    operations.push(color_operation("rg", rect.color));
    operations.push(Operation::new(
        "re",
        vec![
            number(rect.x),
            number(rect.y),
            number(rect.width),
            number(rect.height),
        ],
    ));
    operations.push(Operation::new("f", vec![]));
    operations.push(Operation::new("Q", vec![]));
}

fn line_operations(line: &PlacedLine, operations: &mut Vec<Operation>) -> Result<()> {
    operations.push(Operation::new("BT", vec![]));
    let mut current: Option<(BuiltinFont, f32, Color)> = None;

    for run in &line.runs {
        let bytes = encoding::encode(&run.text).map_err(|c| {
            Error::Pdf(format!(
                "character {:?} of block #{} has no WinAnsi code",
                c, line.block
            ))
        })?;

        if current.map(|(font, size, _)| (font, size)) != Some((run.font, run.size)) {
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(run.font.resource_name().into_bytes()), number(run.size)],
            ));
        }
        if current.map(|(_, _, color)| color) != Some(run.color) {
            operations.push(color_operation("rg", run.color));
        }
        current = Some((run.font, run.size, run.color));

        operations.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                number(run.x),
                number(line.baseline),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(bytes, StringFormat::Literal)],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Ok(())
}

fn content_stream(content: Vec<u8>, compress: bool) -> Result<Stream> {
    if !compress {
        return Ok(Stream::new(Dictionary::new(), content));
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&content)?;
    let compressed = encoder.finish()?;

    let mut stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
    stream.allows_compression = false;
    Ok(stream)
}

/// A PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn info_dictionary(doc: &Document, options: &RenderOptions) -> Dictionary {
    let metadata = &doc.metadata;
    let mut info = Dictionary::new();

    let entries = [
        ("Title", &metadata.title),
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Keywords", &metadata.keywords),
        ("Creator", &metadata.creator),
    ];
    for (key, value) in entries {
        if let Some(value) = value {
            info.set(key, text_string(value));
        }
    }
    info.set("Producer", text_string(&options.producer));

    if let Some(date) = options.creation_date {
        let stamp = date.format("D:%Y%m%d%H%M%SZ").to_string();
        info.set("CreationDate", Object::string_literal(stamp.clone()));
        info.set("ModDate", Object::string_literal(stamp));
    }
    info
}

/// Write a flat outline with one entry per bookmark. Returns the id of the
/// outline root, or `None` when there are no bookmarks.
fn write_outline(
    pdf: &mut lopdf::Document,
    bookmarks: &[Bookmark],
    page_ids: &[ObjectId],
) -> Option<ObjectId> {
    let targets: Vec<(&Bookmark, ObjectId)> = bookmarks
        .iter()
        .filter_map(|b| page_ids.get(b.page).map(|&id| (b, id)))
        .collect();
    if targets.is_empty() {
        return None;
    }

    let root_id = pdf.new_object_id();
    let item_ids: Vec<ObjectId> = targets.iter().map(|_| pdf.new_object_id()).collect();

    let mut items = BTreeMap::new();
    for (i, (bookmark, page_id)) in targets.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => text_string(&bookmark.title),
            "Parent" => root_id,
            "Dest" => vec![
                Object::Reference(*page_id),
                "XYZ".into(),
                0.into(),
                number(bookmark.top),
                Object::Null,
            ],
        };
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        if let Some(&next) = item_ids.get(i + 1) {
            item.set("Next", next);
        }
        items.insert(item_ids[i], item);
    }
    for (id, item) in items {
        pdf.objects.insert(id, Object::Dictionary(item));
    }

    let root = dictionary! {
        "Type" => "Outlines",
        "First" => item_ids[0],
        "Last" => item_ids[item_ids.len() - 1],
        "Count" => item_ids.len() as i64,
    };
    pdf.objects.insert(root_id, Object::Dictionary(root));
    Some(root_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_document, PageGeometry};
    use crate::model::StyleSheet;

    fn sample() -> Document {
        let mut doc = Document::new(StyleSheet::base());
        doc.metadata.title = Some("Summary \u{2013} Financials".to_string());
        doc.append_title("Summary")
            .append_section("Objectives", "Clean the <b>table</b>.")
            .append_preformatted("Segment, Country");
        doc
    }

    fn render(doc: &Document, options: &RenderOptions) -> Vec<u8> {
        let layout = layout_document(doc, &options.geometry).unwrap();
        write_pdf(doc, &layout, options).unwrap()
    }

    #[test]
    fn test_output_is_pdf() {
        let bytes = render(&sample(), &RenderOptions::default());
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }

    #[test]
    fn test_fonts_are_declared() {
        let bytes = render(&sample(), &RenderOptions::default());
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        let page = *loaded.get_pages().get(&1).unwrap();
        let fonts = loaded.get_page_fonts(page).unwrap();
        let names: Vec<String> = fonts
            .values()
            .map(|dict| {
                String::from_utf8_lossy(dict.get(b"BaseFont").unwrap().as_name().unwrap())
                    .into_owned()
            })
            .collect();
        assert!(names.contains(&"Helvetica".to_string()));
        assert!(names.contains(&"Helvetica-Bold".to_string()));
        assert!(names.contains(&"Courier".to_string()));
    }

    #[test]
    fn test_uncompressed_content_is_readable() {
        let options = RenderOptions::default().with_compression(false);
        let bytes = render(&sample(), &options);
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("(Objectives) Tj"));
        assert!(haystack.contains(" Tf"));
        assert!(!haystack.contains("FlateDecode"));
    }

    #[test]
    fn test_compressed_output_is_smaller() {
        let mut doc = sample();
        doc.append_paragraph("Replace Errors with null in numeric columns. ".repeat(40));
        let compressed = render(&doc, &RenderOptions::default());
        let plain = render(&doc, &RenderOptions::default().with_compression(false));
        assert!(compressed.len() < plain.len());
    }

    #[test]
    fn test_repeated_renders_are_identical() {
        let doc = sample();
        let options = RenderOptions::default();
        assert_eq!(render(&doc, &options), render(&doc, &options));
    }

    #[test]
    fn test_text_string_encoding() {
        assert_eq!(
            text_string("Plain"),
            Object::String(b"Plain".to_vec(), StringFormat::Literal)
        );
        match text_string("\u{2013}") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(bytes, vec![0xFE, 0xFF, 0x20, 0x13]);
            }
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn test_no_outline_without_headings() {
        let mut doc = Document::new(StyleSheet::base());
        doc.append_paragraph("no headings here");
        let layout = layout_document(&doc, &PageGeometry::default()).unwrap();
        let bytes = write_pdf(&doc, &layout, &RenderOptions::default()).unwrap();
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        let root = loaded.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = loaded.get_dictionary(root).unwrap();
        assert!(catalog.get(b"Outlines").is_err());
    }
}
