//! A built document: a title, a file stem, the HTML page body, and the
//! page layout the PDF renderer draws.

use crate::html::{html_shell, Media};
use crate::layout::{Block, Layout};

/// Which builder produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    DebtorStatement,
    InventoryReport,
    ProductReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: DocumentKind,
    /// Shown in the page `<title>` and the PDF document info.
    pub title: String,
    /// File name without extension, e.g. `invoice-1700000000000`.
    pub file_stem: String,
    body: String,
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn new(
        kind: DocumentKind,
        title: impl Into<String>,
        file_stem: impl Into<String>,
        body: String,
        layout: Layout,
    ) -> Self {
        Document {
            kind,
            title: title.into(),
            file_stem: file_stem.into(),
            body,
            blocks: layout.into_blocks(),
        }
    }

    /// The inner markup, without the page shell.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Complete page for export.
    pub fn to_html(&self) -> String {
        html_shell(&self.title, &self.body, Media::Screen)
    }

    /// Complete page with print page-box rules, for a platform print dialog.
    pub fn print_view(&self) -> String {
        html_shell(&self.title, &self.body, Media::Print)
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem, extension)
    }
}
