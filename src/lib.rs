//! # pqreport
//!
//! Static PDF report documenting the Power Query cleaning steps applied to
//! the *Financial Sample* workbook.
//!
//! The crate carries its own small flowable engine: named styles with
//! inheritance, a tagged block model, a paginating layout engine using the
//! standard 14 font metrics, and a PDF writer built on `lopdf`.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pqreport::Result<()> {
//!     let path = pqreport::render_report("PowerQuery_Financials_Summary.pdf")?;
//!     println!("wrote {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Building other documents
//!
//! ```no_run
//! use pqreport::{Document, StyleSheet};
//!
//! let mut doc = Document::new(StyleSheet::base());
//! doc.append_title("Notes")
//!     .append_section("Scope", "Only the <b>cleaned</b> table is covered.")
//!     .append_preformatted("Profit = SUM(Financials_Table[Profit])");
//! doc.render("notes.pdf")?;
//! # Ok::<(), pqreport::Error>(())
//! ```

pub mod encoding;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod model;
pub mod render;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use inspect::{inspect_bytes, inspect_file, InspectedPage, Inspection};
pub use layout::{layout_document, Layout, Margins, PageGeometry, PageSize};
pub use model::{
    Alignment, Block, BlockKind, Color, Document, DocumentState, FontFamily, Metadata, Style,
    StyleRoles, StyleSheet, TextRun,
};
pub use render::{JsonFormat, RenderOptions};
pub use report::{build_document, define_styles, DEFAULT_FILE_NAME};

use std::path::{Path, PathBuf};

/// Build the Power Query summary and write it to `path`.
///
/// Returns `path` on success. Fails with [`Error::Write`] when the
/// destination cannot be written; no partial file is left behind.
///
/// # Example
///
/// ```no_run
/// let path = pqreport::render_report("/tmp/out.pdf").unwrap();
/// assert_eq!(path, std::path::Path::new("/tmp/out.pdf"));
/// ```
pub fn render_report<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    render_report_with_options(path, &RenderOptions::default())
}

/// Build the Power Query summary and write it with custom options.
pub fn render_report_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<PathBuf> {
    let mut doc = build_document()?;
    doc.render_with_options(path, options)
}

/// Build the Power Query summary and return the PDF bytes.
pub fn report_bytes(options: &RenderOptions) -> Result<Vec<u8>> {
    render::render_to_bytes(&build_document()?, options)
}

/// Get the library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
