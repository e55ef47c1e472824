use crate::core::ast::{Block, Document};
use crate::render::Renderer;
use crate::Result;

/// Renders a document as readable plain text.
///
/// Blocks are separated by a blank line, line breaks become newlines and list
/// rows get a bullet (or a number for ordered lists).
#[derive(Debug, Clone)]
pub struct PlainTextRenderer {
    pub bullet: String,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self {
            bullet: "\u{2022} ".to_string(),
        }
    }
}

impl Renderer for PlainTextRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let mut blocks = Vec::new();
        for block in &document.blocks {
            let rendered = match block {
                Block::Heading { inline, .. } | Block::Paragraph { inline } => {
                    crate::core::ast::inline_text(inline)
                }
                Block::List { ordered, items } => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let marker = if *ordered {
                            format!("{}. ", i + 1)
                        } else {
                            self.bullet.clone()
                        };
                        format!("{}{}", marker, crate::core::ast::inline_text(item))
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            blocks.push(rendered);
        }
        Ok(blocks.join("\n\n"))
    }
}
