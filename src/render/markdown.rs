use crate::core::ast::{Block, Document, InlineNode};
use crate::render::{
    escape_line_start, escape_markdown_link_destination, escape_markdown_link_text,
    escape_markdown_text, Renderer,
};
use crate::Result;

/// Renders a document as CommonMark-compatible Markdown.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    /// Use `<u>…</u>` for underline; otherwise underline is dropped.
    pub html_underline: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            html_underline: true,
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let mut blocks = Vec::with_capacity(document.blocks.len());

        for block in &document.blocks {
            let rendered = match block {
                Block::Heading { level, inline } => {
                    let hashes = "#".repeat(usize::from(*level));
                    // ATX headings are single-line.
                    let body = self.render_inline(inline, "").replace("  \n", " ");
                    format!("{} {}", hashes, body)
                }
                Block::Paragraph { inline } => escape_lines(&self.render_inline(inline, "")),
                Block::List { ordered, items } => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let marker = if *ordered {
                            format!("{}. ", i + 1)
                        } else {
                            "- ".to_string()
                        };
                        let indent = " ".repeat(marker.len());
                        let body = escape_lines(&self.render_inline(item, &indent));
                        format!("{}{}", marker, body)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            if !rendered.trim().is_empty() {
                blocks.push(rendered);
            }
        }

        let mut out = blocks.join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }
}

impl MarkdownRenderer {
    /// Renders inline nodes; `break_indent` is written after every hard break.
    fn render_inline(&self, nodes: &[InlineNode], break_indent: &str) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                InlineNode::Text(text) => out.push_str(&escape_markdown_text(text)),
                InlineNode::Bold(text) => wrap(&mut out, "**", &escape_markdown_text(text), "**"),
                InlineNode::Italic(text) => wrap(&mut out, "*", &escape_markdown_text(text), "*"),
                InlineNode::Underline(text) if self.html_underline => {
                    wrap(&mut out, "<u>", &escape_markdown_text(text), "</u>")
                }
                InlineNode::Underline(text) => out.push_str(&escape_markdown_text(text)),
                InlineNode::Code(text) => {
                    let fence = if text.contains('`') { "``" } else { "`" };
                    let padded = if text.starts_with('`') || text.ends_with('`') {
                        format!(" {} ", text)
                    } else {
                        text.clone()
                    };
                    wrap(&mut out, fence, &padded, fence);
                }
                InlineNode::Link { text, href } if href.is_empty() => {
                    out.push_str(&escape_markdown_text(text))
                }
                InlineNode::Link { text, href } => out.push_str(&format!(
                    "[{}]({})",
                    escape_markdown_link_text(text),
                    escape_markdown_link_destination(href)
                )),
                InlineNode::LineBreak => {
                    out.push_str("  \n");
                    out.push_str(break_indent);
                }
            }
        }
        out
    }
}

/// Emphasis markers must hug non-whitespace, so edge whitespace goes outside.
fn wrap(out: &mut String, open: &str, text: &str, close: &str) {
    if text.trim().is_empty() {
        out.push_str(text);
        return;
    }
    let content = text.trim();
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    out.push_str(leading);
    out.push_str(open);
    out.push_str(content);
    out.push_str(close);
    out.push_str(trailing);
}

fn escape_lines(rendered: &str) -> String {
    rendered
        .split('\n')
        .map(escape_line_start)
        .collect::<Vec<_>>()
        .join("\n")
}
