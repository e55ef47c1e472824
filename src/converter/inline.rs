//! Inline formatter - converts the content of one block into inline nodes.

use super::context::{Degradation, RenderContext};
use super::tokenizer::{tokenize, InlineTag, Tag, TagClass, TagKind, Token};
use crate::core::ast::InlineNode;
use regex::Regex;
use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<\s*/?\s*br\b[^>]*>").expect("br pattern is valid"))
}

/// Converter for the inline content of a block or list item.
pub struct InlineFormatter;

impl InlineFormatter {
    /// Converts block content into inline nodes.
    ///
    /// The content is split on `<br>` variants first; each line is then
    /// scanned for flat inline tag pairs. Markup that cannot be matched
    /// degrades to plain text.
    pub fn convert(content: &str, context: &mut RenderContext<'_>) -> Vec<InlineNode> {
        let content = context.trim(content);
        let mut nodes = Vec::new();

        for (i, segment) in line_break_pattern().split(content).enumerate() {
            if i > 0 {
                nodes.push(InlineNode::LineBreak);
            }
            let segment = context.trim(segment);
            Self::convert_segment(segment, context, &mut nodes);
        }

        nodes
    }

    fn convert_segment(segment: &str, context: &mut RenderContext<'_>, out: &mut Vec<InlineNode>) {
        if segment.is_empty() {
            return;
        }

        let tokens = tokenize(segment);
        let mut closes = CloseIndex::new(&tokens);
        let mut pending = String::new();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::Text(text) => pending.push_str(text),
                Token::Comment(_) => {}
                Token::Tag(tag) => match (tag.class(), tag.kind) {
                    (TagClass::Inline(kind), TagKind::Open) => {
                        if let Some(close) = closes.next_after(&tag.name, i) {
                            Self::flush_text(&mut pending, context, out);
                            let inner = Self::inner_text(&tokens[i + 1..close]);
                            if !inner.is_empty() {
                                out.push(Self::make_node(kind, tag, inner));
                            }
                            i = close + 1;
                            continue;
                        }
                        context.report(Degradation::UnmatchedInlineTag(tag.name.clone()));
                    }
                    (TagClass::Inline(_), TagKind::SelfClosing) => {
                        context.report(Degradation::UnmatchedInlineTag(tag.name.clone()));
                    }
                    (TagClass::Inline(_), TagKind::Close) => {
                        context.report(Degradation::StrayClosingTag(tag.name.clone()));
                    }
                    (TagClass::Unsupported, TagKind::Open | TagKind::SelfClosing) => {
                        context.report(Degradation::UnsupportedTag(tag.name.clone()));
                    }
                    _ => {}
                },
            }
            i += 1;
        }

        Self::flush_text(&mut pending, context, out);
    }

    /// Text of the tokens between a matched pair; nested markup is dropped.
    fn inner_text(tokens: &[Token<'_>]) -> String {
        tokens
            .iter()
            .filter_map(|token| match token {
                Token::Text(text) => Some(*text),
                _ => None,
            })
            .collect()
    }

    fn make_node(kind: InlineTag, tag: &Tag<'_>, inner: String) -> InlineNode {
        match kind {
            InlineTag::Bold => InlineNode::Bold(inner),
            InlineTag::Italic => InlineNode::Italic(inner),
            InlineTag::Underline => InlineNode::Underline(inner),
            InlineTag::Code => InlineNode::Code(inner),
            InlineTag::Link => InlineNode::Link {
                text: inner,
                href: tag.attr("href").unwrap_or_default().trim().to_string(),
            },
        }
    }

    /// Emits pending text as a `Text` node. Blank runs are dropped unless
    /// whitespace is preserved.
    fn flush_text(pending: &mut String, context: &RenderContext<'_>, out: &mut Vec<InlineNode>) {
        let keep = if context.preserve_whitespace() {
            !pending.is_empty()
        } else {
            !pending.trim().is_empty()
        };
        if keep {
            out.push(InlineNode::Text(std::mem::take(pending)));
        } else {
            pending.clear();
        }
    }
}

/// Positions of closing tags, grouped by tag name, in token order.
///
/// Lookups only move forward, so each index is discarded at most once.
struct CloseIndex<'t> {
    by_name: HashMap<&'t str, VecDeque<usize>>,
}

impl<'t> CloseIndex<'t> {
    fn new(tokens: &'t [Token<'_>]) -> Self {
        let mut by_name: HashMap<&'t str, VecDeque<usize>> = HashMap::new();
        for (idx, token) in tokens.iter().enumerate() {
            if let Token::Tag(tag) = token {
                if tag.kind == TagKind::Close {
                    by_name.entry(tag.name.as_str()).or_default().push_back(idx);
                }
            }
        }
        Self { by_name }
    }

    /// Index of the first closing tag named `name` after `open`.
    fn next_after(&mut self, name: &str, open: usize) -> Option<usize> {
        let queue = self.by_name.get_mut(name)?;
        while queue.front().is_some_and(|&idx| idx <= open) {
            queue.pop_front();
        }
        queue.front().copied()
    }
}
