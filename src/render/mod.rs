mod escape;
mod json;
mod markdown;
mod styled;
mod text;

use crate::core::ast::Document;
use crate::Result;

pub use escape::{
    escape_line_start, escape_markdown_link_destination, escape_markdown_link_text,
    escape_markdown_text,
};
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use styled::{
    DefaultStyleSheet, StyleSheet, StyledBlock, StyledRenderer, StyledRow, StyledSpan, TextStyle,
};
pub use text::PlainTextRenderer;

pub trait Renderer {
    fn render(&self, document: &Document) -> Result<String>;
}
