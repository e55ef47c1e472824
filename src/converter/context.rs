use crate::RenderOptions;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A best-effort recovery applied while rendering.
///
/// Degradations never stop rendering; they describe where the output lost
/// fidelity relative to the input markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tag", rename_all = "snake_case")]
pub enum Degradation {
    /// `li` content with no enclosing `ul`/`ol`.
    OrphanListItem,
    /// Non-blank text inside a list but outside any `li`, discarded.
    DiscardedListText,
    /// A closing tag with nothing open to close.
    StrayClosingTag(String),
    /// A tag outside the supported subset; only its text survives.
    UnsupportedTag(String),
    /// An inline open tag with no matching close tag.
    UnmatchedInlineTag(String),
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::OrphanListItem => write!(f, "list item outside of any list"),
            Degradation::DiscardedListText => write!(f, "text between list items discarded"),
            Degradation::StrayClosingTag(tag) => write!(f, "stray closing tag </{}>", tag),
            Degradation::UnsupportedTag(tag) => write!(f, "unsupported tag <{}>", tag),
            Degradation::UnmatchedInlineTag(tag) => write!(f, "unmatched inline tag <{}>", tag),
        }
    }
}

/// Context passed through rendering for options and collected degradations.
pub struct RenderContext<'a> {
    options: &'a RenderOptions,
    degradations: Vec<Degradation>,
    reported_unsupported: HashSet<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            degradations: Vec::new(),
            reported_unsupported: HashSet::new(),
        }
    }

    pub fn preserve_whitespace(&self) -> bool {
        self.options.preserve_whitespace
    }

    pub fn drop_orphan_list_items(&self) -> bool {
        self.options.drop_orphan_list_items
    }

    /// Records a degradation. Unsupported tags are reported once per name.
    pub fn report(&mut self, degradation: Degradation) {
        if let Degradation::UnsupportedTag(tag) = &degradation {
            if !self.reported_unsupported.insert(tag.clone()) {
                return;
            }
        }
        tracing::debug!(%degradation, "rich text degraded");
        self.degradations.push(degradation);
    }

    /// Applies the whitespace policy to the edges of a content run.
    pub fn trim<'s>(&self, text: &'s str) -> &'s str {
        if self.preserve_whitespace() {
            text
        } else {
            text.trim()
        }
    }

    pub fn into_degradations(self) -> Vec<Degradation> {
        self.degradations
    }
}
