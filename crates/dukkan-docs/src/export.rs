//! # Export
//!
//! Writes rendered documents into the export directory.
//!
//! ```text
//! render(doc) ──► bytes
//!     │
//!     ▼
//! <dir>/.<name>.<uuid>.tmp   write + flush
//!     │ ok                        │ err
//!     ▼                           ▼
//! rename ──► <dir>/<name>     remove tmp, DocError::Io
//! ```
//!
//! A failed export never leaves a half-written file under the final name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::Document;
use crate::error::{DocError, DocResult};
use crate::pdf::PdfRenderer;
use crate::render::{HtmlRenderer, Renderer};

#[derive(Clone)]
pub struct Exporter {
    dir: PathBuf,
    renderer: Arc<dyn Renderer>,
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("dir", &self.dir)
            .field("extension", &self.renderer.extension())
            .finish()
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DocError + '_ {
    move |source| DocError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, renderer: Arc<dyn Renderer>) -> Self {
        Exporter {
            dir: dir.into(),
            renderer,
        }
    }

    /// Exporter using [`HtmlRenderer`].
    pub fn html(dir: impl Into<PathBuf>) -> Self {
        Exporter::new(dir, Arc::new(HtmlRenderer))
    }

    pub fn pdf(dir: impl Into<PathBuf>, renderer: PdfRenderer) -> Self {
        Exporter::new(dir, Arc::new(renderer))
    }

    pub fn extension(&self) -> &'static str {
        self.renderer.extension()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name `document` would be exported under.
    pub fn file_name(&self, document: &Document) -> String {
        document.file_name(self.renderer.extension())
    }

    /// Renders and writes `document`. Returns the final path.
    pub async fn export(&self, document: &Document) -> DocResult<PathBuf> {
        let name = self.file_name(document);
        if document.file_stem.trim().is_empty() {
            return Err(DocError::InvalidFileName(name));
        }

        let bytes = self.renderer.render(document)?;
        debug!(file = %name, bytes = bytes.len(), "Rendered document");

        fs::create_dir_all(&self.dir)
            .await
            .map_err(io_error(&self.dir))?;

        let target = self.dir.join(&name);
        let temp = self.dir.join(format!(".{}.{}.tmp", name, Uuid::new_v4()));

        if let Err(e) = fs::write(&temp, &bytes).await {
            discard(&temp).await;
            return Err(io_error(&temp)(e));
        }
        if let Err(e) = fs::rename(&temp, &target).await {
            discard(&temp).await;
            return Err(io_error(&target)(e));
        }

        info!(path = %target.display(), "Document exported");
        Ok(target)
    }
}

async fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %temp.display(), error = %e, "Failed to remove temp file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use crate::layout::Layout;

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn extension(&self) -> &'static str {
            "pdf"
        }

        fn render(&self, _document: &Document) -> DocResult<Vec<u8>> {
            Err(DocError::Render("no PDF engine".to_string()))
        }
    }

    fn doc() -> Document {
        Document::new(
            DocumentKind::Invoice,
            "فاتورة رقم 1",
            "invoice-1",
            "<p>1</p>".to_string(),
            Layout::new(),
        )
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dukkan-docs-{}-{}", tag, Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = scratch_dir("ok");
        let exporter = Exporter::html(&dir);

        let path = exporter.export(&doc()).await.unwrap();
        assert_eq!(path, dir.join("invoice-1.html"));

        let written = fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("<p>1</p>"));

        let mut entries = fs::read_dir(&dir).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["invoice-1.html".to_string()]);

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_pdf_export() {
        let dir = scratch_dir("pdf");
        let exporter = Exporter::pdf(&dir, PdfRenderer::builtin());

        let path = exporter.export(&doc()).await.unwrap();
        assert_eq!(path, dir.join("invoice-1.pdf"));
        let bytes = fs::read(&path).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_render_failure_writes_nothing() {
        let dir = scratch_dir("fail");
        let exporter = Exporter::new(&dir, Arc::new(FailingRenderer));

        assert_eq!(exporter.file_name(&doc()), "invoice-1.pdf");
        let err = exporter.export(&doc()).await.unwrap_err();
        assert!(matches!(err, DocError::Render(_)));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_io_error() {
        let dir = scratch_dir("blocked");
        fs::write(&dir, b"not a directory").await.unwrap();

        let err = Exporter::html(&dir).export(&doc()).await.unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));

        fs::remove_file(&dir).await.unwrap();
    }
}
