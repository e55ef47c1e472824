use serde::{Deserialize, Serialize};

/// A rendered rich-text document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, inline: Vec<InlineNode> },
    Paragraph { inline: Vec<InlineNode> },
    /// Flat list; nested `ul`/`ol` items are folded into the outer list.
    List {
        ordered: bool,
        items: Vec<Vec<InlineNode>>,
    },
}

/// Span-level content. Inline nodes never nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineNode {
    Text(String),
    Bold(String),
    Italic(String),
    Underline(String),
    Link { text: String, href: String },
    Code(String),
    LineBreak,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenated text of every block, one block per line.
    ///
    /// List items are emitted one per line; line breaks become `\n`.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Heading { inline, .. } | Block::Paragraph { inline } => {
                    lines.push(inline_text(inline));
                }
                Block::List { items, .. } => {
                    lines.extend(items.iter().map(|item| inline_text(item)));
                }
            }
        }
        lines.join("\n")
    }
}

impl Block {
    pub fn heading(level: u8, inline: Vec<InlineNode>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            inline,
        }
    }

    pub fn paragraph(inline: Vec<InlineNode>) -> Self {
        Block::Paragraph { inline }
    }
}

impl InlineNode {
    pub fn text(&self) -> &str {
        match self {
            InlineNode::Text(s)
            | InlineNode::Bold(s)
            | InlineNode::Italic(s)
            | InlineNode::Underline(s)
            | InlineNode::Code(s) => s,
            InlineNode::Link { text, .. } => text,
            InlineNode::LineBreak => "\n",
        }
    }
}

pub fn inline_text(nodes: &[InlineNode]) -> String {
    nodes.iter().map(InlineNode::text).collect()
}
