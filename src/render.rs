//! Terminal rendering of formatted replies for the console shell.

use crate::chart::ChartSpec;
use crate::format::{Block, FormattedDocument, InlineSpan, MessageBody, SUB_HEADER_LEVEL, Table};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI escapes for bold/code runs and headers.
    pub ansi: bool,
}

pub fn render_body(body: &MessageBody, options: RenderOptions) -> String {
    match body {
        MessageBody::Literal(text) => text.clone(),
        MessageBody::Formatted(doc) => render_document(doc, options),
    }
}

pub fn render_document(doc: &FormattedDocument, options: RenderOptions) -> String {
    doc.iter()
        .filter_map(|block| render_block(block, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block, options: RenderOptions) -> Option<String> {
    let rendered = match block {
        Block::Paragraph(spans) => render_spans(spans, options),
        Block::Header { level, text, .. } => {
            let text = if *level >= SUB_HEADER_LEVEL {
                text.clone()
            } else {
                text.to_uppercase()
            };
            emphasize(&text, BOLD, options)
        }
        Block::Quote(spans) => format!("  | {}", render_spans(spans, options)),
        Block::Separator => "─".repeat(40),
        Block::ListItem { marker, content } => {
            format!("  {marker} {}", render_spans(content, options))
        }
        Block::Table(table) => render_table(table),
        // A chart that fails to decode renders as nothing.
        Block::ChartRef(raw) => render_chart(&ChartSpec::from_fenced(raw)?),
    };
    Some(rendered)
}

fn emphasize(text: &str, style: &str, options: RenderOptions) -> String {
    if options.ansi {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn render_spans(spans: &[InlineSpan], options: RenderOptions) -> String {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::PlainText(text) => text.clone(),
            InlineSpan::Bold(text) => emphasize(text, BOLD, options),
            InlineSpan::Code(text) if options.ansi => emphasize(text, DIM, options),
            InlineSpan::Code(text) => format!("`{text}`"),
        })
        .collect()
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

pub fn render_table(table: &Table) -> String {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut lines = vec![render_row(&table.header, &widths)];
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(format!("|-{}-|", rule.join("-|-")));
    lines.extend(table.rows.iter().map(|row| render_row(row, &widths)));
    lines.join("\n")
}

/// Text summary of a chart: title, one line per category, point count footer.
pub fn render_chart(spec: &ChartSpec) -> String {
    let mut lines = vec![format!("[grafik] {}", spec.title)];
    for row in &spec.data {
        let category = spec.category(row).unwrap_or_default();
        let values: Vec<String> = spec
            .series
            .iter()
            .map(|series| {
                let value = row
                    .get(&series.key)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string());
                format!("{}={value}", series.name)
            })
            .collect();
        lines.push(format!("  {category}: {}", values.join(", ")));
    }
    lines.push(format!("  {} titik data", spec.point_count()));
    lines.join("\n")
}
