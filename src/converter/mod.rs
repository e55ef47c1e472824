//! Converter modules for HTML to document transformation.

mod block;
mod context;
mod entity;
mod inline;
mod tokenizer;

use crate::core::ast::Document;
use crate::RenderOptions;

pub use self::block::BlockSegmenter;
pub use self::context::{Degradation, RenderContext};
pub use self::entity::decode_entities;
pub use self::inline::InlineFormatter;
pub use self::tokenizer::{strip_tags, tokenize, InlineTag, Tag, TagClass, TagKind, Token};

/// Result of a render pass: the document plus every recovery applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    pub document: Document,
    pub degradations: Vec<Degradation>,
}

impl RenderOutcome {
    /// Whether the input was represented without any loss.
    pub fn is_lossless(&self) -> bool {
        self.degradations.is_empty()
    }
}

/// Main renderer struct that turns WordPress HTML into a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct RichTextRenderer {
    options: RenderOptions,
}

impl RichTextRenderer {
    /// Creates a new renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Creates a new renderer with default options.
    pub fn with_defaults() -> Self {
        Self::new(RenderOptions::default())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders an HTML string into a document. Never fails.
    pub fn render(&self, html: &str) -> Document {
        self.render_with_report(html).document
    }

    /// Renders an HTML string and reports where fidelity was lost.
    pub fn render_with_report(&self, html: &str) -> RenderOutcome {
        let decoded = if self.options.decode_entities {
            decode_entities(html)
        } else {
            std::borrow::Cow::Borrowed(html)
        };

        let mut context = RenderContext::new(&self.options);
        let blocks = BlockSegmenter::new(&mut context).segment(&decoded);

        RenderOutcome {
            document: Document::new(blocks),
            degradations: context.into_degradations(),
        }
    }
}
