//! Rendering options and configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::PageGeometry;

/// Value written as `/Producer` unless overridden.
pub const DEFAULT_PRODUCER: &str = concat!("pqreport ", env!("CARGO_PKG_VERSION"));

/// Options controlling how a document is written to PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Page size and margins
    pub geometry: PageGeometry,

    /// Flate-compress page content streams
    pub compress: bool,

    /// `/CreationDate` entry; omitted when `None` so output is reproducible
    pub creation_date: Option<DateTime<Utc>>,

    /// `/Producer` entry
    pub producer: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Stamp the document with a creation date.
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Set the producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            compress: true,
            creation_date: None,
            producer: DEFAULT_PRODUCER.to_string(),
        }
    }
}
