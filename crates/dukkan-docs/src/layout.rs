//! # Page Layout
//!
//! A flat, renderer-neutral description of a document: what the PDF
//! renderer draws line by line. Builders fill it next to the HTML body.
//!
//! ```text
//! Title("اسم المتجر")              centered, large
//! Text("العنوان")                  right-aligned
//! Pair("رقم الفاتورة: 1", "التاريخ") right edge / left edge
//! Row { cells, bold }              table row, first cell rightmost
//! Rule                             horizontal line
//! Footer("شكراً لتعاملكم معنا")     centered, small
//! ```

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Text(String),
    /// First text at the right edge, second at the left edge.
    Pair(String, String),
    Row { cells: Vec<String>, bold: bool },
    Rule,
    Footer(String),
}

/// Collects blocks for one document.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    blocks: Vec<Block>,
}

impl Layout {
    pub fn new() -> Self {
        Layout::default()
    }

    pub fn title(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Title(text.into()));
        self
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    /// Skipped when `text` is blank.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.blocks.push(Block::Text(text));
        }
        self
    }

    pub fn pair(&mut self, right: impl Into<String>, left: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Pair(right.into(), left.into()));
        self
    }

    pub fn header(&mut self, labels: &[&str]) -> &mut Self {
        self.blocks.push(Block::Row {
            cells: labels.iter().map(|l| l.to_string()).collect(),
            bold: true,
        });
        self
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.blocks.push(Block::Row { cells, bold: false });
        self
    }

    pub fn rule(&mut self) -> &mut Self {
        self.blocks.push(Block::Rule);
        self
    }

    pub fn footer(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Footer(text.into()));
        self
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}
