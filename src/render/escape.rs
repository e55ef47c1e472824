/// Escapes characters that would otherwise start Markdown inline syntax.
pub fn escape_markdown_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes a leading block marker (`#`, `-`, `+`, `1.`) so a line is not
/// re-read as a heading or list row.
pub fn escape_line_start(value: &str) -> String {
    let trimmed = value.trim_start();
    let indent = &value[..value.len() - trimmed.len()];

    if trimmed.starts_with('#') || trimmed.starts_with("- ") || trimmed.starts_with("+ ") {
        return format!("{}\\{}", indent, trimmed);
    }

    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && trimmed[digits..].starts_with(". ") {
        return format!("{}{}\\{}", indent, &trimmed[..digits], &trimmed[digits..]);
    }

    value.to_string()
}

pub fn escape_markdown_link_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '[' | ']' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn escape_markdown_link_destination(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '(' | ')' | ' ' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
