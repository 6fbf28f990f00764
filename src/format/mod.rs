//! Message formatter for bot replies.
//!
//! Turns the semi-structured text the assistant produces into a flat list of
//! blocks the shells can render. The pipeline runs in four passes:
//!
//! - `chart` - pull out fenced `json:chart` blocks, keeping source order
//! - `lines` - classify each remaining line (header, quote, separator, ...)
//! - accumulation - group plain lines into list items, paragraphs and tables
//! - `inline` - split display text into plain, bold and code spans
//!
//! User messages never go through here; they are shown verbatim.

mod chart;
mod inline;
mod lines;
mod table;

pub use chart::{CHART_FENCE_CLOSE, CHART_FENCE_OPEN, Segment, split_charts};
pub use inline::{InlineSpan, format_inline};
pub use lines::{
    HeaderCategory, LineKind, classify_line, header_category, is_table_row, split_list_item,
};
pub use table::{Table, extract_table, is_separator_row, split_cells};

use crate::types::{Message, Sender};

pub const SECTION_HEADER_LEVEL: u8 = 2;
pub const SUB_HEADER_LEVEL: u8 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<InlineSpan>),
    Header {
        level: u8,
        category: HeaderCategory,
        text: String,
    },
    Quote(Vec<InlineSpan>),
    Separator,
    ListItem {
        marker: String,
        content: Vec<InlineSpan>,
    },
    Table(Table),
    /// Raw chart fence, delimiters included.
    ChartRef(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedDocument {
    blocks: Vec<Block>,
}

impl FormattedDocument {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a FormattedDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// What a shell should draw for one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageBody {
    /// User text, shown pre-wrapped with no markup interpretation.
    Literal(String),
    Formatted(FormattedDocument),
}

pub fn format_message(message: &Message) -> MessageBody {
    match message.sender {
        Sender::User => MessageBody::Literal(message.text.clone()),
        Sender::Bot => MessageBody::Formatted(format(&message.text)),
    }
}

pub fn format(text: &str) -> FormattedDocument {
    let mut blocks = Vec::new();
    for segment in split_charts(text) {
        match segment {
            Segment::Chart(raw) => blocks.push(Block::ChartRef(raw.to_string())),
            Segment::Text(span) => segment_lines(span, &mut blocks),
        }
    }
    FormattedDocument { blocks }
}

fn segment_lines<'a>(text: &'a str, blocks: &mut Vec<Block>) {
    let mut pending: Vec<&'a str> = Vec::new();

    for line in text.lines() {
        match classify_line(line) {
            LineKind::Header { category, text } => {
                flush(&mut pending, blocks);
                blocks.push(Block::Header {
                    level: SECTION_HEADER_LEVEL,
                    category,
                    text: text.to_string(),
                });
            }
            LineKind::SubHeader(text) => {
                flush(&mut pending, blocks);
                blocks.push(Block::Header {
                    level: SUB_HEADER_LEVEL,
                    category: HeaderCategory::default(),
                    text: text.to_string(),
                });
            }
            LineKind::Quote(text) => {
                flush(&mut pending, blocks);
                blocks.push(Block::Quote(format_inline(text)));
            }
            LineKind::Separator => {
                flush(&mut pending, blocks);
                blocks.push(Block::Separator);
            }
            LineKind::Blank => flush(&mut pending, blocks),
            LineKind::Plain(line) => pending.push(line),
        }
    }
    flush(&mut pending, blocks);
}

fn flush(pending: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if pending.is_empty() {
        return;
    }
    render_accumulation(pending.as_slice(), blocks);
    pending.clear();
}

fn render_accumulation(lines: &[&str], blocks: &mut Vec<Block>) {
    for line in lines {
        if let Some((marker, content)) = split_list_item(line) {
            blocks.push(Block::ListItem {
                marker: marker.to_string(),
                content: format_inline(content),
            });
        } else if !is_table_row(line) {
            blocks.push(Block::Paragraph(format_inline(line)));
        }
    }

    let text = lines.join("\n");
    if text.contains('|')
        && let Some(table) = extract_table(&text)
    {
        blocks.push(Block::Table(table));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> InlineSpan {
        InlineSpan::PlainText(text.to_string())
    }

    #[test]
    fn prose_is_a_single_paragraph() {
        let doc = format("Curah hujan hari ini ringan.");
        assert_eq!(
            doc.blocks(),
            &[Block::Paragraph(vec![plain("Curah hujan hari ini ringan.")])]
        );
    }

    #[test]
    fn bold_label_paragraph() {
        let doc = format("**Total**: 42");
        assert_eq!(
            doc.blocks(),
            &[Block::Paragraph(vec![
                InlineSpan::Bold("Total".into()),
                plain(": 42"),
            ])]
        );
    }

    #[test]
    fn chart_sits_between_paragraphs() {
        let doc = format("Sebelum\n```json:chart\n{\"type\":\"bar\"}\n```\nSesudah");
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph(vec![plain("Sebelum")]),
                Block::ChartRef("```json:chart\n{\"type\":\"bar\"}\n```".into()),
                Block::Paragraph(vec![plain("Sesudah")]),
            ]
        );
    }

    #[test]
    fn malformed_chart_json_is_still_extracted() {
        let doc = format("```json:chart {tidak valid```");
        assert_eq!(
            doc.blocks(),
            &[Block::ChartRef("```json:chart {tidak valid```".into())]
        );
    }

    #[test]
    fn bullet_list_item() {
        let doc = format("- Catat suhu maksimum");
        assert_eq!(
            doc.blocks(),
            &[Block::ListItem {
                marker: "-".into(),
                content: vec![plain("Catat suhu maksimum")],
            }]
        );
    }

    #[test]
    fn pipe_table_is_one_block() {
        let doc = format("| Pos | Status |\n|---|---|\n| Manggarai | Siaga 3 |");
        assert_eq!(
            doc.blocks(),
            &[Block::Table(Table {
                header: vec!["Pos".into(), "Status".into()],
                rows: vec![vec!["Manggarai".into(), "Siaga 3".into()]],
            })]
        );
    }

    #[test]
    fn table_follows_other_lines_of_its_buffer() {
        let doc = format("Ringkasan pos:\n| Pos | Status |\n|---|---|\n| Depok | Normal |");
        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Block::Paragraph(vec![plain("Ringkasan pos:")]));
        assert!(matches!(&blocks[1], Block::Table(table) if table.rows.len() == 1));
    }

    #[test]
    fn headers_close_open_paragraphs() {
        let doc = format("Pembuka\n## 💡 Saran\n### Detail\n> Kutipan **penting**\n---\nPenutup");
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph(vec![plain("Pembuka")]),
                Block::Header {
                    level: SECTION_HEADER_LEVEL,
                    category: HeaderCategory::Insight,
                    text: "💡 Saran".into(),
                },
                Block::Header {
                    level: SUB_HEADER_LEVEL,
                    category: HeaderCategory::Info,
                    text: "Detail".into(),
                },
                Block::Quote(vec![plain("Kutipan "), InlineSpan::Bold("penting".into())]),
                Block::Separator,
                Block::Paragraph(vec![plain("Penutup")]),
            ]
        );
    }

    #[test]
    fn blank_lines_split_buffers_into_separate_tables() {
        let doc = format("a | b | c\n1 | 2 | 3\n\nx | y | z\n7 | 8 | 9");
        let tables: Vec<_> = doc
            .iter()
            .filter_map(|block| match block {
                Block::Table(table) => Some(table),
                _ => None,
            })
            .collect();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].header, vec!["x", "y", "z"]);
    }

    #[test]
    fn whitespace_only_text_yields_nothing() {
        assert!(format(" \n\t\n").is_empty());
    }

    #[test]
    fn user_messages_are_not_parsed() {
        let message = Message {
            id: crate::types::MessageId::new(1),
            text: "**jangan** diformat\n- apa adanya".into(),
            sender: Sender::User,
            timestamp: time::OffsetDateTime::UNIX_EPOCH,
        };
        assert_eq!(
            format_message(&message),
            MessageBody::Literal("**jangan** diformat\n- apa adanya".into())
        );
    }
}
