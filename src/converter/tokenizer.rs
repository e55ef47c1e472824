//! Tag tokenizer - splits HTML text into text runs, tags and comments.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:"[^"]*"|'[^']*'|[^>"'])*?)(/?)\s*>"#,
        )
        .expect("tag pattern is valid")
    })
}

fn attr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("attribute pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    SelfClosing,
}

/// Category a tag name falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Heading(u8),
    Paragraph,
    Division,
    UnorderedList,
    OrderedList,
    ListItem,
    Inline(InlineTag),
    LineBreak,
    /// Element whose body is never rendered (`script`, `style`).
    RawText,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineTag {
    Bold,
    Italic,
    Underline,
    Link,
    Code,
}

impl TagClass {
    pub fn from_name(name: &str) -> Self {
        match name {
            "h1" => TagClass::Heading(1),
            "h2" => TagClass::Heading(2),
            "h3" => TagClass::Heading(3),
            "h4" => TagClass::Heading(4),
            "h5" => TagClass::Heading(5),
            "h6" => TagClass::Heading(6),
            "p" => TagClass::Paragraph,
            "div" => TagClass::Division,
            "ul" => TagClass::UnorderedList,
            "ol" => TagClass::OrderedList,
            "li" => TagClass::ListItem,
            "strong" | "b" => TagClass::Inline(InlineTag::Bold),
            "em" | "i" => TagClass::Inline(InlineTag::Italic),
            "u" => TagClass::Inline(InlineTag::Underline),
            "a" => TagClass::Inline(InlineTag::Link),
            "code" => TagClass::Inline(InlineTag::Code),
            "br" => TagClass::LineBreak,
            "script" | "style" => TagClass::RawText,
            _ => TagClass::Unsupported,
        }
    }

    pub fn is_block(self) -> bool {
        matches!(
            self,
            TagClass::Heading(_)
                | TagClass::Paragraph
                | TagClass::Division
                | TagClass::UnorderedList
                | TagClass::OrderedList
                | TagClass::ListItem
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Lower-cased element name.
    pub name: String,
    pub kind: TagKind,
    pub attrs: &'a str,
    /// The whole tag as it appeared in the source.
    pub raw: &'a str,
}

impl<'a> Tag<'a> {
    pub fn class(&self) -> TagClass {
        TagClass::from_name(&self.name)
    }

    /// Returns the value of the named attribute, if present.
    ///
    /// Attribute names compare case-insensitively.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let attrs: &'a str = self.attrs;
        attr_pattern().captures_iter(attrs).find_map(|caps| {
            let key = caps.get(1)?;
            if !key.as_str().eq_ignore_ascii_case(name) {
                return None;
            }
            caps.get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
    Comment(&'a str),
}

/// Splits `input` into tokens. Text between tags is preserved verbatim;
/// a `<` that does not start a well-formed tag stays part of the text.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in tag_pattern().captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(Token::Text(&input[last..whole.start()]));
        }
        last = whole.end();

        let Some(name) = caps.get(2) else {
            tokens.push(Token::Comment(whole.as_str()));
            continue;
        };

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
        let kind = if closing {
            TagKind::Close
        } else if self_closing {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };

        tokens.push(Token::Tag(Tag {
            name: name.as_str().to_ascii_lowercase(),
            kind,
            attrs: caps.get(3).map_or("", |m| m.as_str()),
            raw: whole.as_str(),
        }));
    }

    if last < input.len() {
        tokens.push(Token::Text(&input[last..]));
    }

    tokens
}

/// Removes every tag and comment, keeping only the text between them.
pub fn strip_tags(input: &str) -> String {
    tokenize(input)
        .into_iter()
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}
