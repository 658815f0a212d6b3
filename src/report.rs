//! The Power Query processing summary for the *Financial Sample* workbook.
//!
//! All content is literal. [`build_document`] assembles the block sequence
//! in reading order; [`render_report`](crate::render_report) writes it out.

use crate::error::Result;
use crate::model::{Color, Document, FontFamily, Metadata, StyleRoles, StyleSheet};

/// File name the CLI writes to when no destination is given.
pub const DEFAULT_FILE_NAME: &str = "PowerQuery_Financials_Summary.pdf";

pub const REPORT_TITLE: &str = "Power Query Processing Summary \u{2013} Financials_Table";

/// Column names the cleaned fact table is expected to expose.
pub const CANONICAL_COLUMNS: [&str; 17] = [
    "SegmentID",
    "CountryID",
    "ProductID",
    "DiscountID",
    "UnitsID",
    "Manufacturing Price",
    "Sale Price",
    "Gross Sales",
    "Discounts",
    "Sales",
    "COGS",
    "Profit",
    "Date",
    "DateID",
    "Month Number",
    "Month Name",
    "Year",
];

/// Section headings in the order they appear.
pub const SECTION_HEADINGS: [&str; 11] = [
    "Objectives",
    "1) Import the correct source",
    "2) Promote headers only when needed",
    "3) Normalize column names",
    "4) Remove blank/noise rows (root cause of \u{201C}empty\u{201D} table)",
    "5) Fix UnitsID becoming 0",
    "6) Culture-safe type casting (vi-VN)",
    "Results",
    "Applied Steps (as seen in Query Settings)",
    "Target star schema",
    "Suggested DAX measures (starting set)",
];

/// Applied steps as listed in Query Settings.
pub const APPLIED_STEPS: [&str; 9] = [
    "Source",
    "Navigation",
    "NeedPromote",
    "Promoted",
    "CleanNames",
    "Filtered (Keep Rows)",
    "TypePairsAll/Cols",
    "TypePairs",
    "Typed",
];

pub const DAX_MEASURES: &str = "\
Total Sales    = SUM(Financials_Table[Sales])
Total Profit   = SUM(Financials_Table[Profit])
Discount %     = DIVIDE(SUM(Financials_Table[Discounts]), SUM(Financials_Table[Gross Sales]))";

const HEADING_BLUE: Color = Color::rgb(0x0b, 0x53, 0x94);

const OBJECTIVES: [&str; 6] = [
    "Import the true table from the Excel workbook and avoid accidental sheet imports.",
    "Promote headers only when necessary.",
    "Normalize column names to the canonical schema.",
    "Remove the large block of blank rows that caused an \u{201C}empty\u{201D} fact table.",
    "Fix the UnitsID column that turned into zeros.",
    "Cast types safely using Vietnamese culture (vi-VN) so commas are read as decimals.",
];

const RESULTS: [&str; 3] = [
    "~700 valid data rows remain after cleaning; numbers and dates parse correctly.",
    "UnitsID is fixed (no longer all zeros).",
    "No phantom rows with DateID 011900.",
];

/// The base sheet plus the four report styles: `TitleBig`, `H2`, `Body`
/// and `Mono`.
///
/// Fails with [`Error::UnknownStyle`](crate::Error::UnknownStyle) if a
/// parent is missing from the base sheet.
pub fn define_styles() -> Result<StyleSheet> {
    let mut sheet = StyleSheet::base();

    sheet.derive_from("Title", "TitleBig", |s| s.font_size(22.0).space_after(16.0))?;
    sheet.derive_from("Heading2", "H2", |s| {
        s.font_size(14.0).space_after(8.0).color(HEADING_BLUE)
    })?;
    sheet.derive_from("BodyText", "Body", |s| s.leading(14.0).space_after(6.0))?;
    sheet.derive_from("Code", "Mono", |s| {
        s.font(FontFamily::Courier)
            .font_size(9.0)
            .leading(12.0)
            .background(Color::WHITESMOKE)
            .border_padding(6.0)
    })?;

    Ok(sheet)
}

/// Style roles used by the report.
pub fn report_roles() -> StyleRoles {
    StyleRoles {
        title: "TitleBig".to_string(),
        heading: "H2".to_string(),
        body: "Body".to_string(),
        mono: "Mono".to_string(),
    }
}

/// The canonical columns as they appear in the schema block, split over two
/// lines after "Sale Price,".
pub fn schema_block() -> String {
    let (first, second) = CANONICAL_COLUMNS.split_at(7);
    format!("{},\n{}", first.join(", "), second.join(", "))
}

/// The applied steps joined into a single trace line.
pub fn applied_steps_trace() -> String {
    APPLIED_STEPS.join(" \u{2192} ")
}

/// Build the complete report document.
pub fn build_document() -> Result<Document> {
    let metadata = Metadata {
        title: Some(REPORT_TITLE.to_string()),
        subject: Some("Power Query data-cleaning steps for the Financial Sample workbook".to_string()),
        keywords: Some("Power Query, data cleaning, Financials_Table, DAX".to_string()),
        creator: Some("pqreport".to_string()),
        ..Metadata::default()
    };
    let mut doc = Document::with_roles(define_styles()?, report_roles()).with_metadata(metadata);

    doc.append_title(REPORT_TITLE).append_paragraph(
        "This document summarizes the data-cleaning and type-handling logic applied in \
         **Power Query** for the *Financial Sample* workbook. All steps are written to be \
         reproducible and robust.",
    );

    doc.append_heading(SECTION_HEADINGS[0])
        .append_bullet_list(OBJECTIVES);

    doc.append_section(
        SECTION_HEADINGS[1],
        "Open the workbook with Excel.Workbook(...) and fetch the real table named \
         **Financials_Table** (fallback to **Financials** if needed). This prevents the column \
         drift seen when pulling directly from a sheet.",
    )
    .append_section(
        SECTION_HEADINGS[2],
        "Detect whether the first row still contains generic headers (e.g., Column1/Column2). \
         Only then call Table.PromoteHeaders to avoid double-promotion.",
    )
    .append_section(
        SECTION_HEADINGS[3],
        "Trim and remove NBSP (char 160) from all headers so they match the canonical schema \
         below:",
    )
    .append_preformatted(schema_block())
    .append_section(
        SECTION_HEADINGS[4],
        "Keep only records where **Date** and **SegmentID** are not null. This removes \
         ~1,048,575 blank rows (those with only DateID = 011900), which previously made the \
         table look empty in the model.",
    )
    .append_section(
        SECTION_HEADINGS[5],
        "Extract the numeric digits from UnitsID and cast to Int64. Remove/avoid any prior \
         steps that force replacements to 0. Result: UnitsID values now reflect the original \
         counts instead of all zeros.",
    )
    .append_section(
        SECTION_HEADINGS[6],
        "Apply types using the Vietnamese culture so comma decimals are parsed correctly. \
         Numeric columns \u{2192} number; Date \u{2192} date; DateID, Month Number, Year \
         \u{2192} Int64.",
    );

    doc.append_heading(SECTION_HEADINGS[7])
        .append_bullet_list(RESULTS);

    doc.append_heading(SECTION_HEADINGS[8])
        .append_preformatted(applied_steps_trace());

    doc.append_heading(SECTION_HEADINGS[9])
        .append_paragraph("<b>Fact:</b> Financials_Table")
        .append_paragraph(
            "<b>Dimensions:</b> Segment_Table, Country_Table, Product_Table, Discount_Table, \
             Units_Table, Date_Table (each cleansed to distinct keys, proper types; one-to-many \
             single-direction relationships from dimensions to fact).",
        );

    doc.append_heading(SECTION_HEADINGS[10])
        .append_preformatted(DAX_MEASURES);

    doc.append_spacer(12.0).append_paragraph(
        "Note: If you also need the M code skeleton, I can export a separate appendix with the \
         parameterized query.",
    );

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockKind};

    #[test]
    fn test_report_styles_inherit() {
        let sheet = define_styles().unwrap();
        let title = sheet.get("TitleBig").unwrap();
        assert!(title.bold);
        assert_eq!(title.font_size, 22.0);
        assert_eq!(title.space_after, 16.0);
        assert_eq!(title.parent.as_deref(), Some("Title"));

        let h2 = sheet.get("H2").unwrap();
        assert_eq!(h2.color, Color::from_hex("#0b5394").unwrap());
        assert!(h2.keep_with_next);

        let body = sheet.get("Body").unwrap();
        assert_eq!(body.leading, 14.0);
        assert_eq!(body.space_after, 6.0);

        let mono = sheet.get("Mono").unwrap();
        assert_eq!(mono.font, FontFamily::Courier);
        assert_eq!(mono.font_size, 9.0);
        assert_eq!(mono.leading, 12.0);
        assert_eq!(mono.background, Some(Color::WHITESMOKE));
        assert_eq!(mono.border_padding, 6.0);
        assert_eq!(mono.parent.as_deref(), Some("Code"));
        assert_eq!(mono.left_indent, 36.0);
    }

    #[test]
    fn test_headings_in_order() {
        let doc = build_document().unwrap();
        assert_eq!(doc.headings(), SECTION_HEADINGS.to_vec());
    }

    #[test]
    fn test_block_sequence() {
        let doc = build_document().unwrap();
        let kinds: Vec<BlockKind> = doc.blocks().iter().map(Block::kind).collect();
        use BlockKind::*;
        assert_eq!(
            kinds,
            vec![
                Paragraph, Paragraph, // title, intro
                Heading, BulletList, // objectives
                Heading, Paragraph, Heading, Paragraph, Heading, Paragraph, Preformatted,
                Heading, Paragraph, Heading, Paragraph, Heading, Paragraph,
                Heading, BulletList, // results
                Heading, Preformatted, // applied steps
                Heading, Paragraph, Paragraph, // star schema
                Heading, Preformatted, // DAX
                Spacer, Paragraph,
            ]
        );
    }

    #[test]
    fn test_schema_block_lists_canonical_columns() {
        let normalized = schema_block().split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(normalized, CANONICAL_COLUMNS.join(", "));
        assert_eq!(schema_block().lines().count(), 2);
        assert!(schema_block().starts_with("SegmentID,"));
        assert!(schema_block().lines().next().unwrap().ends_with("Sale Price,"));
    }

    #[test]
    fn test_applied_steps_trace() {
        let trace = applied_steps_trace();
        assert!(trace.starts_with("Source \u{2192} Navigation"));
        assert!(trace.ends_with("TypePairs \u{2192} Typed"));
    }

    #[test]
    fn test_blocks_use_report_styles() {
        let doc = build_document().unwrap();
        let styles = doc.styles();
        for block in doc.blocks() {
            if let Some(name) = block.style_name() {
                assert!(styles.contains(name), "missing style {name}");
            }
        }
        assert_eq!(doc.blocks()[0].style_name(), Some("TitleBig"));
    }
}
