use once_cell::sync::Lazy;
use regex::Regex;

pub const CHART_FENCE_OPEN: &str = "```json:chart";
pub const CHART_FENCE_CLOSE: &str = "```";

static CHART_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json:chart.*?```").expect("chart pattern compiles"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Chart(&'a str),
}

/// Cut `text` into text and chart segments in source order. Chart segments keep
/// their fences; whitespace-only text between them is dropped.
pub fn split_charts(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in CHART_BLOCK.find_iter(text) {
        push_text(&mut segments, &text[cursor..found.start()]);
        segments.push(Segment::Chart(found.as_str()));
        cursor = found.end();
    }
    push_text(&mut segments, &text[cursor..]);
    segments
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, span: &'a str) {
    if !span.trim().is_empty() {
        segments.push(Segment::Text(span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_chart_is_one_text_segment() {
        assert_eq!(split_charts("halo"), vec![Segment::Text("halo")]);
        assert!(split_charts("  \n ").is_empty());
    }

    #[test]
    fn charts_split_text_in_order() {
        let text = "Awal\n```json:chart {\"a\":1}```\ntengah\n```json:chart\n{}\n```";
        assert_eq!(
            split_charts(text),
            vec![
                Segment::Text("Awal\n"),
                Segment::Chart("```json:chart {\"a\":1}```"),
                Segment::Text("\ntengah\n"),
                Segment::Chart("```json:chart\n{}\n```"),
            ]
        );
    }

    #[test]
    fn plain_code_fence_is_not_a_chart() {
        let text = "```json\n{}\n```";
        assert_eq!(split_charts(text), vec![Segment::Text(text)]);
    }
}
