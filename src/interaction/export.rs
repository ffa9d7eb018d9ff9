//! Serialization of a table grid for the clipboard and for CSV files.

/// Tab-separated cells, one row per line.
pub fn to_tsv(grid: &[Vec<String>]) -> String {
    grid.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-separated cells, one row per line, quoted where needed.
pub fn to_csv(grid: &[Vec<String>]) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| csv_field(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote a field iff it holds a comma, quote or line break; inner quotes
/// are doubled.
pub fn csv_field(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
