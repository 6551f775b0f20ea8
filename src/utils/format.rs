use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("numbered item pattern is valid"));

/// Reply text shaped for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedMessage<'a> {
    /// No numbered list found; render as-is.
    Text(&'a str),
    /// Trimmed lines of a reply that contains a numbered list.
    Lines(Vec<&'a str>),
}

/// How a single line of [`FormattedMessage::Lines`] should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ListItem,
    Break,
    Paragraph,
}

pub fn is_numbered_item(line: &str) -> bool {
    NUMBERED_ITEM.is_match(line)
}

/// Splits `content` into trimmed lines when any line starts a numbered list
/// item (`12.`); otherwise returns it untouched.
pub fn format_message(content: &str) -> FormattedMessage<'_> {
    let has_numbered_list = content.split('\n').any(|line| is_numbered_item(line.trim()));

    if has_numbered_list {
        FormattedMessage::Lines(content.split('\n').map(str::trim).collect())
    } else {
        FormattedMessage::Text(content)
    }
}

pub fn classify_line(line: &str) -> LineKind {
    if is_numbered_item(line) {
        LineKind::ListItem
    } else if line.is_empty() {
        LineKind::Break
    } else {
        LineKind::Paragraph
    }
}
