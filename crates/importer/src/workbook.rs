use anyhow::{Context, Result, anyhow};
use calamine::{Reader, open_workbook_auto};
use std::path::Path;
use tracing::info;

/// Reads every row of the first worksheet as display strings, header
/// included. Empty cells become empty strings. Row and column positions
/// count from A1 even when the used range starts further in.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Workbook {} has no worksheets", path.display()))?
        .with_context(|| format!("Failed to read first worksheet of {}", path.display()))?;

    let used: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    let rows = pad_to_origin(range.start(), used);

    info!("📄 Read {} row(s) from {}", rows.len(), path.display());
    Ok(rows)
}

/// Shifts a used range starting at `(row, column)` back to A1 by
/// prepending empty rows and cells.
fn pad_to_origin(start: Option<(u32, u32)>, rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let Some((first_row, first_column)) = start else {
        return rows;
    };

    let leading = vec![String::new(); first_column as usize];
    let shifted = rows.into_iter().map(|row| {
        let mut cells = leading.clone();
        cells.extend(row);
        cells
    });

    std::iter::repeat_with(Vec::new)
        .take(first_row as usize)
        .chain(shifted)
        .collect()
}
