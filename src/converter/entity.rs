//! Entity decoder - replaces HTML character references with literal characters.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+)|#([0-9]+)|([A-Za-z]+));")
            .expect("entity pattern is valid")
    })
}

/// Looks up one of the supported named entities.
fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "nbsp" => '\u{00A0}',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        _ => return None,
    };
    Some(c)
}

fn code_point(digits: &str, radix: u32) -> Option<char> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}

/// Decodes named, decimal and hex entities in a single pass.
///
/// Every reference is decoded at most once, so `&amp;lt;` becomes `&lt;`.
/// Anything that is not a recognised entity (unknown names, malformed
/// digits, invalid code points) is left untouched.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    entity_pattern().replace_all(input, |caps: &Captures<'_>| {
        let decoded = if let Some(hex) = caps.get(1) {
            code_point(hex.as_str(), 16)
        } else if let Some(dec) = caps.get(2) {
            code_point(dec.as_str(), 10)
        } else {
            caps.get(3).and_then(|name| named_entity(name.as_str()))
        };

        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}
