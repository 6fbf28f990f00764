#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A row made only of dashes, pipes, colons and whitespace, e.g. `|---|:--|`.
pub fn is_separator_row(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '-' | '|' | ':') || c.is_whitespace())
}

pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pull a table out of a block of text. The first pipe line becomes the
/// header, every later pipe line a data row, separator rows are skipped.
pub fn extract_table(text: &str) -> Option<Table> {
    let mut rows = text
        .lines()
        .filter(|line| line.contains('|') && !is_separator_row(line))
        .map(split_cells);
    let header = rows.next()?;
    Some(Table {
        header,
        rows: rows.collect(),
    })
}
