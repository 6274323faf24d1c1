//! # PDF Renderer
//!
//! Draws a document's [`Block`] layout onto A4 pages with `printpdf`.
//!
//! ```text
//! ┌──────────────────────────── 210mm ───────────────────────────┐
//! │ 15mm                                                    15mm │
//! │                     Title (centered)                         │
//! │ left text of a Pair                 right text / Text lines ◄│ RTL: lines
//! │ ──────────────────────────────────────────────────────────── │ start at
//! │ cell 4     │ cell 3     │ cell 2     │ cell 1               ◄│ the right
//! │                     Footer (centered)                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fonts
//! Arabic needs an embedded TrueType font. The renderer embeds the font it
//! was built with; [`PdfRenderer::discover`] takes a configured file or
//! the first Arabic-capable system font it finds. Without one it falls back
//! to the builtin Helvetica, which has no Arabic glyphs.
//!
//! Text is put into visual order with the Unicode bidi algorithm before it
//! is drawn. Letters are not joined into their contextual forms.

use std::borrow::Cow;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use tracing::{debug, warn};
use unicode_bidi::{BidiInfo, Level};

use crate::document::Document;
use crate::error::{DocError, DocResult};
use crate::layout::Block;
use crate::render::Renderer;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const BOTTOM: f32 = 20.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const TEXT_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 8.0;

const PT_TO_MM: f32 = 0.3528;
/// Average advance of a glyph as a share of the font size.
const GLYPH_WIDTH: f32 = 0.5;

/// Checked in order by [`PdfRenderer::discover`].
pub const SYSTEM_ARABIC_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/opentype/fonts-hosny-amiri/Amiri-Regular.ttf",
    "/usr/share/fonts/truetype/fonts-arabeyes/ae_AlArabiya.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    font: Option<Arc<Vec<u8>>>,
}

impl PdfRenderer {
    /// Embeds `font` (TrueType bytes) in every rendered file.
    pub fn with_font(font: Vec<u8>) -> Self {
        PdfRenderer {
            font: Some(Arc::new(font)),
        }
    }

    /// Builtin Helvetica only. Arabic text will not show.
    pub fn builtin() -> Self {
        PdfRenderer::default()
    }

    pub fn from_font_file(path: &Path) -> DocResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "Loaded PDF font");
        Ok(PdfRenderer::with_font(bytes))
    }

    /// `configured` must load when given. Otherwise the first system font
    /// from [`SYSTEM_ARABIC_FONTS`] that exists, else [`PdfRenderer::builtin`].
    pub fn discover(configured: Option<&Path>) -> DocResult<Self> {
        if let Some(path) = configured {
            return PdfRenderer::from_font_file(path);
        }
        let found = SYSTEM_ARABIC_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file());
        match found {
            Some(path) => PdfRenderer::from_font_file(&path),
            None => {
                warn!("No Arabic font found; PDF exports fall back to Helvetica");
                Ok(PdfRenderer::builtin())
            }
        }
    }

    pub fn has_embedded_font(&self) -> bool {
        self.font.is_some()
    }

    fn load_font(&self, doc: &PdfDocumentReference) -> DocResult<IndirectFontRef> {
        match &self.font {
            Some(bytes) => doc
                .add_external_font(Cursor::new(bytes.as_slice()))
                .map_err(render_error),
            None => doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(render_error),
        }
    }
}

fn render_error(err: impl std::fmt::Display) -> DocError {
    DocError::Render(err.to_string())
}

/// Reorders `text` from logical to visual order for a right-to-left page.
pub fn visual_order(text: &str) -> Cow<'_, str> {
    let bidi = BidiInfo::new(text, Some(Level::rtl()));
    match bidi.paragraphs.as_slice() {
        [] => Cow::Borrowed(text),
        [para] => bidi.reorder_line(para, para.range.clone()),
        paras => Cow::Owned(
            paras
                .iter()
                .map(|p| bidi.reorder_line(p, p.range.clone()).trim_end().to_string())
                .collect::<Vec<_>>()
                .join(" "),
        ),
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH * PT_TO_MM
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.6
}

/// Current page and vertical position.
struct Pen<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    y: f32,
    pages: usize,
}

impl<'a> Pen<'a> {
    fn advance(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", self.pages + 1));
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.pages += 1;
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= height;
    }

    fn draw(&self, text: &str, size: f32, x: f32) {
        self.layer
            .use_text(visual_order(text), size, Mm(x), Mm(self.y), self.font);
    }

    fn right(&self, text: &str, size: f32, right_edge: f32) {
        let x = (right_edge - text_width(text, size)).max(MARGIN);
        self.draw(text, size, x);
    }

    fn centered(&self, text: &str, size: f32) {
        let x = ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN);
        self.draw(text, size, x);
    }

    fn rule(&self) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn block(&mut self, block: &Block) {
        let right_edge = PAGE_WIDTH - MARGIN;
        match block {
            Block::Title(text) => {
                self.advance(line_height(TITLE_SIZE));
                self.centered(text, TITLE_SIZE);
            }
            Block::Heading(text) => {
                self.advance(line_height(HEADING_SIZE));
                self.right(text, HEADING_SIZE, right_edge);
            }
            Block::Text(text) => {
                self.advance(line_height(TEXT_SIZE));
                self.right(text, TEXT_SIZE, right_edge);
            }
            Block::Pair(right, left) => {
                self.advance(line_height(TEXT_SIZE));
                self.right(right, TEXT_SIZE, right_edge);
                self.draw(left, TEXT_SIZE, MARGIN);
            }
            Block::Row { cells, bold } => {
                let size = if *bold { TEXT_SIZE + 1.0 } else { TEXT_SIZE };
                self.advance(line_height(size));
                let column = (PAGE_WIDTH - 2.0 * MARGIN) / cells.len().max(1) as f32;
                for (i, cell) in cells.iter().enumerate() {
                    let edge = right_edge - column * i as f32 - 1.0;
                    self.right(cell, size, edge);
                }
            }
            Block::Rule => {
                self.advance(line_height(TEXT_SIZE) / 2.0);
                self.rule();
            }
            Block::Footer(text) => {
                self.advance(line_height(TEXT_SIZE) * 2.0);
                self.centered(text, FOOTER_SIZE);
            }
        }
    }
}

impl Renderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &Document) -> DocResult<Vec<u8>> {
        let (doc, page, layer) =
            PdfDocument::new(&document.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font = self.load_font(&doc)?;

        let pages = {
            let mut pen = Pen {
                doc: &doc,
                layer: doc.get_page(page).get_layer(layer),
                font: &font,
                y: PAGE_HEIGHT - MARGIN,
                pages: 1,
            };
            for block in document.blocks() {
                pen.block(block);
            }
            pen.pages
        };
        debug!(file = %document.file_stem, pages, "Laid out PDF");

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer).map_err(render_error)?;
        writer.into_inner().map_err(render_error)
    }
}
