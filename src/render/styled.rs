//! Styled layout - maps the document model onto a fixed set of visual styles.
//!
//! This is the hand-off point for a UI layer: every block becomes either a
//! run of styled spans or a set of marked rows, and every span carries the
//! attributes needed to draw it (scale, weight, slant, underline, monospace,
//! tap target).

use crate::core::ast::{Block, Document, InlineNode};

/// Visual attributes of a span.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size relative to body text.
    pub font_scale: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub monospace: bool,
    /// Tap target for link spans.
    pub link: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            bold: false,
            italic: false,
            underline: false,
            monospace: false,
            link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledSpan {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledRow {
    /// Bullet or number drawn before the row.
    pub marker: String,
    pub spans: Vec<StyledSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyledBlock {
    /// Heading or paragraph text.
    Text { spans: Vec<StyledSpan> },
    /// List rendered as marked rows.
    Rows { rows: Vec<StyledRow> },
}

/// Strategy for the visual mapping of blocks and inline nodes.
pub trait StyleSheet: Send + Sync {
    /// Font scale for a heading level (1..=6).
    fn heading_scale(&self, level: u8) -> f32;

    /// Marker for the `index`-th (zero based) row of a list.
    fn list_marker(&self, ordered: bool, index: usize) -> String {
        if ordered {
            format!("{}.", index + 1)
        } else {
            "\u{2022}".to_string()
        }
    }

    /// Style of an inline node inside a block whose base style is `base`.
    fn inline_style(&self, base: &TextStyle, node: &InlineNode) -> TextStyle {
        let mut style = base.clone();
        match node {
            InlineNode::Bold(_) => style.bold = true,
            InlineNode::Italic(_) => style.italic = true,
            InlineNode::Underline(_) => style.underline = true,
            InlineNode::Code(_) => style.monospace = true,
            InlineNode::Link { href, .. } => {
                style.underline = true;
                if !href.is_empty() {
                    style.link = Some(href.clone());
                }
            }
            InlineNode::Text(_) | InlineNode::LineBreak => {}
        }
        style
    }
}

/// Default heading scale: 2.0, 1.5, 1.25, 1.1, 1.0, 0.9 for h1..h6.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStyleSheet;

impl StyleSheet for DefaultStyleSheet {
    fn heading_scale(&self, level: u8) -> f32 {
        match level {
            1 => 2.0,
            2 => 1.5,
            3 => 1.25,
            4 => 1.1,
            5 => 1.0,
            _ => 0.9,
        }
    }
}

/// Lays a document out into styled blocks using a [`StyleSheet`].
#[derive(Debug, Default, Clone)]
pub struct StyledRenderer<S = DefaultStyleSheet> {
    sheet: S,
}

impl<S: StyleSheet> StyledRenderer<S> {
    pub fn new(sheet: S) -> Self {
        Self { sheet }
    }

    pub fn layout(&self, document: &Document) -> Vec<StyledBlock> {
        document
            .blocks
            .iter()
            .map(|block| match block {
                Block::Heading { level, inline } => {
                    let base = TextStyle {
                        font_scale: self.sheet.heading_scale(*level),
                        bold: true,
                        ..Default::default()
                    };
                    StyledBlock::Text {
                        spans: self.spans(inline, &base),
                    }
                }
                Block::Paragraph { inline } => StyledBlock::Text {
                    spans: self.spans(inline, &TextStyle::default()),
                },
                Block::List { ordered, items } => StyledBlock::Rows {
                    rows: items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| StyledRow {
                            marker: self.sheet.list_marker(*ordered, i),
                            spans: self.spans(item, &TextStyle::default()),
                        })
                        .collect(),
                },
            })
            .collect()
    }

    fn spans(&self, nodes: &[InlineNode], base: &TextStyle) -> Vec<StyledSpan> {
        nodes
            .iter()
            .map(|node| StyledSpan {
                text: node.text().to_string(),
                style: self.sheet.inline_style(base, node),
            })
            .collect()
    }
}
