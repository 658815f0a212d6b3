//! Rendering: PDF output plus plain-text and JSON views of a document.

mod json;
mod options;
mod output;
mod pdf;
mod text;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::layout::layout_document;
use crate::model::Document;

pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_PRODUCER};
pub use output::write_atomic;
pub use text::to_text;

/// Lay out `doc` and serialize it to PDF bytes.
pub fn render_to_bytes(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    let layout = layout_document(doc, &options.geometry)?;
    pdf::write_pdf(doc, &layout, options)
}

/// Lay out `doc` and write it atomically to `path`.
///
/// Nothing is written when layout fails. Returns `path` on success.
pub fn render_to_path(doc: &Document, path: &Path, options: &RenderOptions) -> Result<PathBuf> {
    let bytes = render_to_bytes(doc, options)?;
    write_atomic(path, &bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_path_buf())
}
