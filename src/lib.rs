//! # wprich
//!
//! Renders the HTML subset found in WordPress REST content fields
//! (`content.rendered`, `excerpt.rendered`) into a structured document of
//! headings, paragraphs and lists that a presentation layer can draw without
//! re-parsing HTML.
//!
//! ## Example
//!
//! ```
//! use wprich::{Block, InlineNode};
//!
//! let doc = wprich::render("<p>Hello <b>World</b>!</p>");
//! assert_eq!(
//!     doc.blocks,
//!     vec![Block::Paragraph {
//!         inline: vec![
//!             InlineNode::Text("Hello ".into()),
//!             InlineNode::Bold("World".into()),
//!             InlineNode::Text("!".into()),
//!         ],
//!     }]
//! );
//! ```
//!
//! Rendering never fails. Use [`RichTextRenderer::render_with_report`] to see
//! where markup was flattened or dropped.

pub mod converter;
pub mod core;
pub mod error;
pub mod render;

pub use crate::core::ast::{Block, Document, InlineNode};
pub use converter::{Degradation, RenderOutcome, RichTextRenderer};
pub use error::{Error, Result};
pub use render::{
    DefaultStyleSheet, JsonRenderer, MarkdownRenderer, PlainTextRenderer, Renderer, StyleSheet,
    StyledRenderer,
};

/// Options for HTML to document rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Keep whitespace at block and line edges, and blank runs between
    /// inline tags.
    pub preserve_whitespace: bool,
    /// Decode character entities before parsing structure.
    pub decode_entities: bool,
    /// Drop `li` content that has no enclosing list. When false it is kept
    /// as a paragraph.
    pub drop_orphan_list_items: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preserve_whitespace: false,
            decode_entities: true,
            drop_orphan_list_items: true,
        }
    }
}

/// Renders HTML into a document with default options.
pub fn render(html: &str) -> Document {
    RichTextRenderer::with_defaults().render(html)
}
