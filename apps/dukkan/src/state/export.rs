//! Where exported documents go, and how they are rendered.

use dukkan_docs::Exporter;

#[derive(Debug, Clone)]
pub struct ExportState {
    exporter: Exporter,
}

impl ExportState {
    pub fn new(exporter: Exporter) -> Self {
        ExportState { exporter }
    }

    pub fn inner(&self) -> &Exporter {
        &self.exporter
    }
}
