//! Integration tests for building and rendering custom documents.

use pqreport::model::Block;
use pqreport::render::{render_to_bytes, to_text};
use pqreport::{
    inspect_bytes, layout_document, Document, DocumentState, Margins, PageGeometry, PageSize,
    RenderOptions, StyleSheet,
};

fn long_document(sections: usize) -> Document {
    let mut doc = Document::new(StyleSheet::base());
    doc.append_title("Long report");
    for i in 0..sections {
        doc.append_section(
            format!("Section {i}"),
            "Apply types using the Vietnamese culture so comma decimals are parsed correctly. "
                .repeat(5),
        );
    }
    doc
}

#[test]
fn test_long_document_spans_pages() {
    let doc = long_document(30);
    let bytes = render_to_bytes(&doc, &RenderOptions::default()).unwrap();
    let inspection = inspect_bytes(&bytes).unwrap();

    assert!(inspection.page_count() > 1);
    let expected: Vec<String> = (0..30).map(|i| format!("Section {i}")).collect();
    assert_eq!(inspection.bookmarks, expected);
}

#[test]
fn test_page_count_matches_layout() {
    let doc = long_document(30);
    let options = RenderOptions::default();
    let layout = layout_document(&doc, &options.geometry).unwrap();
    let inspection = inspect_bytes(&render_to_bytes(&doc, &options).unwrap()).unwrap();

    assert_eq!(layout.page_count(), inspection.page_count());
    assert_eq!(layout.lines().count(), inspection.lines().count());
}

#[test]
fn test_smaller_page_needs_more_pages() {
    let doc = long_document(20);
    let a4 = layout_document(&doc, &PageGeometry::default()).unwrap();
    let small = layout_document(
        &doc,
        &PageGeometry::new(PageSize::LETTER, Margins::all(144.0)),
    )
    .unwrap();

    assert!(small.page_count() > a4.page_count());
}

#[test]
fn test_tags_become_emphasis_and_asterisks_stay() {
    let mut doc = Document::new(StyleSheet::base());
    doc.append_paragraph("<b>Fact:</b> Financials_Table")
        .append_paragraph("applied in **Power Query** for the *Financial Sample* workbook")
        .append_paragraph("2 * 3 stays literal");

    let bytes = render_to_bytes(&doc, &RenderOptions::default()).unwrap();
    let lines: Vec<String> = inspect_bytes(&bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    assert_eq!(
        lines,
        vec![
            "Fact: Financials_Table",
            "applied in **Power Query** for the *Financial Sample* workbook",
            "2 * 3 stays literal",
        ]
    );
}

#[test]
fn test_preformatted_keeps_spacing() {
    let mut doc = Document::new(StyleSheet::base());
    doc.append_preformatted("Total Sales    = SUM(x)\nTotal Profit   = SUM(y)");

    let bytes = render_to_bytes(&doc, &RenderOptions::default()).unwrap();
    let lines: Vec<String> = inspect_bytes(&bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    assert_eq!(lines, vec!["Total Sales    = SUM(x)", "Total Profit   = SUM(y)"]);
}

#[test]
fn test_appends_after_render_do_not_change_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    let mut doc = Document::new(StyleSheet::base());
    doc.append_section("Only", "section");

    doc.render(&path).unwrap();
    let before = std::fs::read(&path).unwrap();
    assert_eq!(doc.state(), DocumentState::Rendered);

    doc.append_paragraph("late addition");
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(doc.len(), 3);
}

#[test]
fn test_layout_error_identifies_block() {
    let mut doc = Document::new(StyleSheet::base());
    doc.append_paragraph("fine").push(Block::Paragraph {
        text: "styled".to_string(),
        style: "NoSuchStyle".to_string(),
    });

    let err = render_to_bytes(&doc, &RenderOptions::default()).unwrap_err();
    assert!(err.is_layout());
    assert!(err.to_string().contains("#1"));
}

#[test]
fn test_text_view_follows_block_order() {
    let doc = pqreport::build_document().unwrap();
    let text = to_text(&doc);

    let objectives = text.find("Objectives").unwrap();
    let results = text.find("Results\n").unwrap();
    let dax = text.find("Suggested DAX measures").unwrap();
    assert!(objectives < results && results < dax);
    assert!(text.contains("    Total Sales    = SUM(Financials_Table[Sales])"));
}
