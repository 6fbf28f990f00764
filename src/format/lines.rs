//! Line classification for bot output.
//!
//! Each matcher looks at a single line and either claims it or passes. The
//! classifier tries them in a fixed order and the first claim wins:
//! header, sub-header, quote, separator, then plain text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Visual category of a `##` header, picked from the icon it carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeaderCategory {
    #[default]
    Info,
    Data,
    Insight,
    Action,
    Warning,
}

impl HeaderCategory {
    pub fn label(self) -> &'static str {
        match self {
            HeaderCategory::Info => "info",
            HeaderCategory::Data => "data",
            HeaderCategory::Insight => "insight",
            HeaderCategory::Action => "action",
            HeaderCategory::Warning => "warning",
        }
    }
}

/// Icons that turn a `##` line into a header. Variation selectors are left off
/// so both `⚠` and `⚠️` match.
const HEADER_ICONS: &[(&str, HeaderCategory)] = &[
    ("ℹ", HeaderCategory::Info),
    ("🔍", HeaderCategory::Info),
    ("📊", HeaderCategory::Data),
    ("💡", HeaderCategory::Insight),
    ("🔧", HeaderCategory::Action),
    ("🛠", HeaderCategory::Action),
    ("⚠", HeaderCategory::Warning),
];

const LIST_EMOJI_MARKERS: &[&str] = &[
    "✅", "⚠️", "⚠", "🔧", "📝", "⏰", "📊", "⏱️", "⏱", "📋", "🆘", "🚑", "🚧", "🔄", "⚡",
];

static LIST_ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let emoji = LIST_EMOJI_MARKERS
        .iter()
        .map(|marker| regex::escape(marker))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(?P<marker>\d+\.|[-*]|{emoji})\s+(?P<content>.*)$"))
        .expect("list item pattern compiles")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Header {
        category: HeaderCategory,
        text: &'a str,
    },
    SubHeader(&'a str),
    Quote(&'a str),
    Separator,
    Blank,
    Plain(&'a str),
}

pub fn header_category(text: &str) -> Option<HeaderCategory> {
    HEADER_ICONS
        .iter()
        .find(|(icon, _)| text.contains(icon))
        .map(|(_, category)| *category)
}

pub fn match_header(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix("##")?;
    if rest.starts_with('#') {
        return None;
    }
    let text = rest.trim_start();
    if !HEADER_ICONS.iter().any(|(icon, _)| text.starts_with(icon)) {
        return None;
    }
    let category = header_category(text).unwrap_or_default();
    Some(LineKind::Header {
        category,
        text: text.trim_end(),
    })
}

pub fn match_sub_header(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix("###")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(LineKind::SubHeader(rest.trim()))
}

pub fn match_quote(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix('>')?;
    Some(LineKind::Quote(rest.trim_start()))
}

pub fn match_separator(line: &str) -> Option<LineKind<'_>> {
    (line.trim() == "---").then_some(LineKind::Separator)
}

type LineMatcher = for<'a> fn(&'a str) -> Option<LineKind<'a>>;

const MATCHERS: &[LineMatcher] = &[match_header, match_sub_header, match_quote, match_separator];

pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(line))
        .unwrap_or(LineKind::Plain(line))
}

/// Split a list line into `(marker, content)`.
pub fn split_list_item(line: &str) -> Option<(&str, &str)> {
    let caps = LIST_ITEM_PATTERN.captures(line)?;
    let marker = caps.name("marker")?.as_str();
    let content = caps.name("content")?.as_str();
    Some((marker, content))
}

/// Lines with more than one pipe are table rows and are left to table extraction.
pub fn is_table_row(line: &str) -> bool {
    line.split('|').count() > 2
}
