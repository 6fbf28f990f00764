use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(?P<bold>.+?)\*\*|`(?P<code>[^`]+)`").expect("inline pattern compiles")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineSpan {
    PlainText(String),
    Bold(String),
    Code(String),
}

impl InlineSpan {
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::PlainText(text) | InlineSpan::Bold(text) | InlineSpan::Code(text) => text,
        }
    }
}

/// Split `text` into plain, bold and code runs, left to right.
pub fn format_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in INLINE_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(InlineSpan::PlainText(text[cursor..whole.start()].to_string()));
        }
        if let Some(bold) = caps.name("bold") {
            spans.push(InlineSpan::Bold(bold.as_str().to_string()));
        } else if let Some(code) = caps.name("code") {
            spans.push(InlineSpan::Code(code.as_str().to_string()));
        }
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(InlineSpan::PlainText(text[cursor..].to_string()));
    }
    spans
}
