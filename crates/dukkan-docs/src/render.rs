//! # Renderers
//!
//! Turns a [`Document`] into file bytes. The exported file's extension
//! comes from the renderer: [`crate::PdfRenderer`] writes `.pdf`,
//! [`HtmlRenderer`] writes the RTL page as `.html`.

use crate::document::Document;
use crate::error::DocResult;

pub trait Renderer: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, document: &Document) -> DocResult<Vec<u8>>;
}

/// Emits the complete HTML page as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, document: &Document) -> DocResult<Vec<u8>> {
        Ok(document.to_html().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use crate::layout::Layout;

    #[test]
    fn test_html_renderer() {
        let doc = Document::new(
            DocumentKind::InventoryReport,
            "تقرير المخزون",
            "inventory-report-1",
            "<p>نهاية التقرير</p>".to_string(),
            Layout::new(),
        );
        let bytes = HtmlRenderer.render(&doc).unwrap();
        let page = String::from_utf8(bytes).unwrap();

        assert!(page.contains("<title>تقرير المخزون</title>"));
        assert!(page.contains("<p>نهاية التقرير</p>"));
        assert_eq!(doc.file_name(HtmlRenderer.extension()), "inventory-report-1.html");
    }
}
