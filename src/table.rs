//! GitHub-style pipe tables.
//!
//! A table is a header line containing `|`, a divider line of dashes with
//! optional colons, and every following non-blank line that contains `|`.
//! Ragged tables are accepted as-is; the emitter pads or truncates rows.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Alignment, Table, TableIds};

static DIVIDER_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-{3,}:?$").expect("divider pattern must compile"));

/// Split a table line into trimmed cells.
///
/// One leading and one trailing pipe are dropped. `\|` is a literal pipe.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut body = line.trim();
    if let Some(rest) = body.strip_prefix('|') {
        body = rest;
    }
    if body.ends_with('|') && !body.ends_with("\\|") {
        body = &body[..body.len() - 1];
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                cell.push('|');
            }
            '|' => {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

/// Parse a divider line such as `| :--- | :---: | ---: |`.
///
/// Returns `None` unless every cell is at least three dashes with optional
/// colons (whitespace inside a cell is ignored).
pub fn alignment_row(line: &str) -> Option<Vec<Alignment>> {
    if line.trim().is_empty() {
        return None;
    }
    split_cells(line)
        .iter()
        .map(|cell| {
            let compact: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
            if !DIVIDER_CELL.is_match(&compact) {
                return None;
            }
            Some(match (compact.starts_with(':'), compact.ends_with(':')) {
                (true, true) => Alignment::Center,
                (false, true) => Alignment::Right,
                _ => Alignment::Left,
            })
        })
        .collect()
}

/// Whether a table starts at `lines[index]`.
pub fn is_table_start(lines: &[&str], index: usize) -> bool {
    lines[index].contains('|')
        && lines
            .get(index + 1)
            .is_some_and(|next| alignment_row(next).is_some())
}

/// Parse the table starting at `lines[start]`.
///
/// Returns the table and the index of the first line after it, or `None`
/// when no table starts there. An id is only drawn from `ids` on success.
pub fn parse_table(lines: &[&str], start: usize, ids: &mut TableIds) -> Option<(Table, usize)> {
    let header = lines.get(start)?;
    if !header.contains('|') {
        return None;
    }
    let alignments = alignment_row(lines.get(start + 1)?)?;
    let headers = split_cells(header);

    let mut rows = Vec::new();
    let mut next = start + 2;
    while let Some(line) = lines.get(next) {
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        rows.push(split_cells(line));
        next += 1;
    }

    let table = Table {
        id: ids.next_id(),
        headers,
        alignments,
        rows,
    };
    tracing::trace!(
        id = %table.id,
        columns = table.column_count(),
        rows = table.rows.len(),
        "parsed table"
    );
    Some((table, next))
}
