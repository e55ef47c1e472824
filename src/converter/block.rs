//! Block segmenter - splits decoded HTML into heading, paragraph and list blocks.

use super::context::{Degradation, RenderContext};
use super::tokenizer::{strip_tags, tokenize, TagClass, TagKind, Token};
use super::InlineFormatter;
use crate::core::ast::{Block, InlineNode};
use std::collections::HashMap;

/// Owner of the content currently being buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// No block tag is open.
    Loose,
    Heading(u8),
    Paragraph,
    Item,
    /// `li` seen with no open list.
    OrphanItem,
}

#[derive(Debug)]
struct ListScope {
    ordered: bool,
    /// Number of nested `ul`/`ol` tags inside the outermost one.
    depth: usize,
    items: Vec<Vec<InlineNode>>,
}

/// Segmenter for block-level structure.
pub struct BlockSegmenter<'c, 'o> {
    context: &'c mut RenderContext<'o>,
    blocks: Vec<Block>,
    buffer: String,
    slot: Slot,
    open_blocks: Vec<TagClass>,
    /// Number of entries per class in `open_blocks`.
    open_counts: HashMap<TagClass, usize>,
    list: Option<ListScope>,
    /// Block tags opened inside an orphan `li` and not yet closed.
    orphan_depth: usize,
    /// Name of the `script`/`style` element being skipped.
    skipping: Option<String>,
}

impl<'c, 'o> BlockSegmenter<'c, 'o> {
    pub fn new(context: &'c mut RenderContext<'o>) -> Self {
        Self {
            context,
            blocks: Vec::new(),
            buffer: String::new(),
            slot: Slot::Loose,
            open_blocks: Vec::new(),
            open_counts: HashMap::new(),
            list: None,
            orphan_depth: 0,
            skipping: None,
        }
    }

    /// Segments entity-decoded HTML into blocks.
    pub fn segment(mut self, input: &str) -> Vec<Block> {
        for token in tokenize(input) {
            if let Some(name) = &self.skipping {
                if let Token::Tag(tag) = &token {
                    if tag.kind == TagKind::Close && &tag.name == name {
                        self.skipping = None;
                    }
                }
                continue;
            }

            match token {
                Token::Text(text) => self.buffer.push_str(text),
                Token::Comment(_) => {}
                Token::Tag(tag) => {
                    let class = tag.class();
                    if class.is_block() {
                        match tag.kind {
                            TagKind::Close => self.close_block(class, &tag.name),
                            TagKind::Open | TagKind::SelfClosing => self.open_block(class),
                        }
                    } else if class == TagClass::RawText {
                        if tag.kind == TagKind::Open {
                            self.skipping = Some(tag.name);
                        }
                    } else {
                        self.buffer.push_str(tag.raw);
                    }
                }
            }
        }

        self.flush();
        self.finish_list();
        self.blocks
    }

    fn open_block(&mut self, class: TagClass) {
        match class {
            TagClass::UnorderedList | TagClass::OrderedList => {
                self.flush();
                match &mut self.list {
                    Some(scope) => scope.depth += 1,
                    None => {
                        self.list = Some(ListScope {
                            ordered: class == TagClass::OrderedList,
                            depth: 0,
                            items: Vec::new(),
                        });
                    }
                }
                self.slot = Slot::Loose;
            }
            TagClass::ListItem => {
                self.flush();
                if self.list.is_some() {
                    self.slot = Slot::Item;
                } else {
                    self.context.report(Degradation::OrphanListItem);
                    self.slot = Slot::OrphanItem;
                    self.orphan_depth = 0;
                }
            }
            // Headings, paragraphs and divs inside a list belong to the current item.
            _ if self.list.is_some() => {}
            _ if self.slot == Slot::OrphanItem => self.orphan_depth += 1,
            TagClass::Heading(level) => {
                self.flush();
                self.push_open(class);
                self.slot = Slot::Heading(level);
            }
            _ => {
                self.flush();
                self.push_open(class);
                self.slot = Slot::Paragraph;
            }
        }
    }

    fn close_block(&mut self, class: TagClass, name: &str) {
        match class {
            TagClass::UnorderedList | TagClass::OrderedList => {
                let Some(scope) = &mut self.list else {
                    self.context.report(Degradation::StrayClosingTag(name.to_string()));
                    return;
                };
                if scope.depth > 0 {
                    scope.depth -= 1;
                    self.flush();
                    self.slot = Slot::Item;
                } else {
                    self.flush();
                    self.finish_list();
                    self.slot = self.enclosing_slot();
                }
            }
            TagClass::ListItem => match self.slot {
                Slot::Item => {
                    self.flush();
                    self.slot = Slot::Loose;
                }
                Slot::OrphanItem => {
                    self.flush();
                    self.slot = self.enclosing_slot();
                }
                _ => self
                    .context
                    .report(Degradation::StrayClosingTag(name.to_string())),
            },
            _ if self.list.is_some() => {}
            _ if self.slot == Slot::OrphanItem && self.orphan_depth > 0 => {
                self.orphan_depth -= 1;
            }
            _ => {
                if self.open_counts.get(&class).copied().unwrap_or(0) == 0 {
                    self.context
                        .report(Degradation::StrayClosingTag(name.to_string()));
                    return;
                }
                self.flush();
                self.pop_open(class);
                self.slot = self.enclosing_slot();
            }
        }
    }

    /// Opens a heading, paragraph or div. A paragraph or heading cannot
    /// contain another block, so an unclosed one on top is closed first.
    fn push_open(&mut self, class: TagClass) {
        if class != TagClass::Division {
            if let Some(top) = self.open_blocks.last().copied() {
                if top != TagClass::Division {
                    self.pop_open(top);
                }
            }
        }
        self.open_blocks.push(class);
        *self.open_counts.entry(class).or_insert(0) += 1;
    }

    /// Closes the innermost open `class` and everything opened after it.
    fn pop_open(&mut self, class: TagClass) {
        while let Some(top) = self.open_blocks.pop() {
            if let Some(count) = self.open_counts.get_mut(&top) {
                *count = count.saturating_sub(1);
            }
            if top == class {
                break;
            }
        }
    }

    /// Slot implied by the innermost block still open outside any list.
    fn enclosing_slot(&self) -> Slot {
        match self.open_blocks.last() {
            Some(TagClass::Heading(level)) => Slot::Heading(*level),
            Some(_) => Slot::Paragraph,
            None => Slot::Loose,
        }
    }

    /// Converts the buffered content into a block (or list item) for the
    /// current slot.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.buffer);

        match self.slot {
            Slot::Loose if self.list.is_some() => {
                if !strip_tags(&content).trim().is_empty() {
                    self.context.report(Degradation::DiscardedListText);
                }
            }
            Slot::Loose => {
                if !strip_tags(&content).trim().is_empty() {
                    self.push_paragraph(&content);
                }
            }
            Slot::Paragraph => self.push_paragraph(&content),
            Slot::Heading(level) => {
                let inline = InlineFormatter::convert(&content, self.context);
                if !inline.is_empty() {
                    tracing::trace!(level, "heading block");
                    self.blocks.push(Block::heading(level, inline));
                }
            }
            Slot::Item => {
                let inline = InlineFormatter::convert(&content, self.context);
                if let Some(scope) = &mut self.list {
                    if !inline.is_empty() {
                        scope.items.push(inline);
                    }
                }
            }
            Slot::OrphanItem => {
                if !self.context.drop_orphan_list_items() {
                    self.push_paragraph(&content);
                }
            }
        }
    }

    fn push_paragraph(&mut self, content: &str) {
        let inline = InlineFormatter::convert(content, self.context);
        if !inline.is_empty() {
            tracing::trace!(nodes = inline.len(), "paragraph block");
            self.blocks.push(Block::paragraph(inline));
        }
    }

    fn finish_list(&mut self) {
        if let Some(scope) = self.list.take() {
            if !scope.items.is_empty() {
                tracing::trace!(items = scope.items.len(), "list block");
                self.blocks.push(Block::List {
                    ordered: scope.ordered,
                    items: scope.items,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderOptions;
    use pretty_assertions::assert_eq;

    fn segment(input: &str) -> Vec<Block> {
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&options);
        BlockSegmenter::new(&mut ctx).segment(input)
    }

    fn segment_with_report(input: &str) -> (Vec<Block>, Vec<Degradation>) {
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&options);
        let blocks = BlockSegmenter::new(&mut ctx).segment(input);
        (blocks, ctx.into_degradations())
    }

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            segment("<h1>A</h1><h6>F</h6>"),
            vec![
                Block::heading(1, vec![text("A")]),
                Block::heading(6, vec![text("F")]),
            ]
        );
    }

    #[test]
    fn test_whitespace_between_blocks_is_ignored() {
        assert_eq!(
            segment("<p>a</p>\n\n<p>b</p>\n"),
            vec![
                Block::paragraph(vec![text("a")]),
                Block::paragraph(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            segment("<ol>\n<li>One</li>\n<li>Two</li>\n</ol>"),
            vec![Block::List {
                ordered: true,
                items: vec![vec![text("One")], vec![text("Two")]],
            }]
        );
    }

    #[test]
    fn test_nested_list_is_flattened() {
        assert_eq!(
            segment("<ul><li>a<ul><li>b</li></ul>c</li><li>d</li></ul>"),
            vec![Block::List {
                ordered: false,
                items: vec![
                    vec![text("a")],
                    vec![text("b")],
                    vec![text("c")],
                    vec![text("d")]
                ],
            }]
        );
    }

    #[test]
    fn test_paragraph_inside_list_item() {
        assert_eq!(
            segment("<ul><li><p>wrapped</p></li></ul>"),
            vec![Block::List {
                ordered: false,
                items: vec![vec![text("wrapped")]],
            }]
        );
    }

    #[test]
    fn test_orphan_list_item_is_dropped() {
        let (blocks, report) = segment_with_report("<p>a</p><li>orphan</li><p>b</p>");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph(vec![text("a")]),
                Block::paragraph(vec![text("b")]),
            ]
        );
        assert_eq!(report, vec![Degradation::OrphanListItem]);
    }

    #[test]
    fn test_orphan_list_item_kept_when_configured() {
        let options = RenderOptions {
            drop_orphan_list_items: false,
            ..Default::default()
        };
        let mut ctx = RenderContext::new(&options);
        let blocks = BlockSegmenter::new(&mut ctx).segment("<li>orphan</li>");
        assert_eq!(blocks, vec![Block::paragraph(vec![text("orphan")])]);
    }

    #[test]
    fn test_orphan_list_item_wrapping_blocks_is_dropped() {
        let (blocks, report) =
            segment_with_report("<li><p>leak</p>tail</li><li><div><h3>x</h3></div></li>");
        assert_eq!(blocks, Vec::new());
        assert_eq!(
            report,
            vec![Degradation::OrphanListItem, Degradation::OrphanListItem]
        );
    }

    #[test]
    fn test_enclosing_close_ends_orphan_item() {
        let (blocks, report) = segment_with_report("<div><li>orphan</div>after");
        assert_eq!(blocks, vec![Block::paragraph(vec![text("after")])]);
        assert_eq!(report, vec![Degradation::OrphanListItem]);
    }

    #[test]
    fn test_orphan_list_item_wrapping_paragraph_kept_when_configured() {
        let options = RenderOptions {
            drop_orphan_list_items: false,
            ..Default::default()
        };
        let mut ctx = RenderContext::new(&options);
        let blocks = BlockSegmenter::new(&mut ctx).segment("<li><p>kept</p></li>");
        assert_eq!(blocks, vec![Block::paragraph(vec![text("kept")])]);
    }

    #[test]
    fn test_unclosed_paragraphs_do_not_nest() {
        let (blocks, report) = segment_with_report("<p>a<p>b<h2>c</h2>d</p>");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph(vec![text("a")]),
                Block::paragraph(vec![text("b")]),
                Block::heading(2, vec![text("c")]),
                Block::paragraph(vec![text("d")]),
            ]
        );
        assert_eq!(report, vec![Degradation::StrayClosingTag("p".into())]);
    }

    #[test]
    fn test_deep_block_nesting_stays_linear() {
        let html = format!("{}{}", "<div>".repeat(50_000), "</p>".repeat(50_000));
        let started = std::time::Instant::now();
        let (blocks, report) = segment_with_report(&html);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert!(blocks.is_empty());
        assert_eq!(report.len(), 50_000);
    }

    #[test]
    fn test_unclosed_list_is_emitted_at_end() {
        assert_eq!(
            segment("<ul><li>a<li>b"),
            vec![Block::List {
                ordered: false,
                items: vec![vec![text("a")], vec![text("b")]],
            }]
        );
    }

    #[test]
    fn test_empty_list_is_skipped() {
        assert_eq!(segment("<ul>\n</ul>"), Vec::new());
    }

    #[test]
    fn test_text_between_items_is_discarded() {
        let (blocks, report) = segment_with_report("<ul>junk<li>a</li></ul>");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                items: vec![vec![text("a")]],
            }]
        );
        assert_eq!(report, vec![Degradation::DiscardedListText]);
    }

    #[test]
    fn test_unsupported_block_content_is_absorbed() {
        let (blocks, report) =
            segment_with_report("<p>before <blockquote>quoted</blockquote> after</p>");
        assert_eq!(
            blocks,
            vec![Block::paragraph(vec![text("before quoted after")])]
        );
        assert_eq!(report, vec![Degradation::UnsupportedTag("blockquote".into())]);
    }

    #[test]
    fn test_table_text_becomes_paragraph() {
        assert_eq!(
            segment("<table><tr><td>cell</td></tr></table>"),
            vec![Block::paragraph(vec![text("cell")])]
        );
    }

    #[test]
    fn test_div_wrapping_paragraphs() {
        let (blocks, report) = segment_with_report("<div><p>a</p>tail</div>");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph(vec![text("a")]),
                Block::paragraph(vec![text("tail")]),
            ]
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_stray_closing_tags_are_reported() {
        let (blocks, report) = segment_with_report("</p>text</ul>");
        assert_eq!(blocks, vec![Block::paragraph(vec![text("text")])]);
        assert_eq!(
            report,
            vec![
                Degradation::StrayClosingTag("p".into()),
                Degradation::StrayClosingTag("ul".into()),
            ]
        );
    }

    #[test]
    fn test_script_and_style_bodies_are_skipped() {
        assert_eq!(
            segment("<p>a<script>alert('<p>x</p>')</script>b</p><style>p{}</style>"),
            vec![Block::paragraph(vec![text("ab")])]
        );
    }

    #[test]
    fn test_top_level_text_between_blocks() {
        assert_eq!(
            segment("<h2>T</h2>loose text<p>p</p>"),
            vec![
                Block::heading(2, vec![text("T")]),
                Block::paragraph(vec![text("loose text")]),
                Block::paragraph(vec![text("p")]),
            ]
        );
    }
}
