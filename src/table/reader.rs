use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::collector::PromptRow;

use super::error::TableError;
use super::format::extension;

/// Header of the column holding the prompts. Matched exactly.
pub const PROMPT_COLUMN: &str = "Prompt";

/// A sheet row: its one-based row number and its stringified cells.
type GridRow = (usize, Vec<String>);

/// Reads the prompt column from a spreadsheet or CSV file.
///
/// The first row is the header. Rows with no data in any cell are skipped;
/// every other row yields a prompt, empty if its prompt cell is blank.
pub fn read_prompts(path: &Path, column: &str) -> Result<Vec<PromptRow>, TableError> {
    let grid = match extension(path).as_deref() {
        Some("csv") => read_csv_grid(path)?,
        _ => read_workbook_grid(path)?,
    };
    prompts_from_grid(grid, column)
}

fn prompts_from_grid(grid: Vec<GridRow>, column: &str) -> Result<Vec<PromptRow>, TableError> {
    let mut rows = grid.into_iter();
    let header = rows.next().map(|(_, cells)| cells).unwrap_or_default();
    let col = header
        .iter()
        .position(|name| name == column)
        .ok_or_else(|| TableError::MissingColumn {
            column: column.to_string(),
            found: header.clone(),
        })?;

    let prompts = rows
        .filter(|(_, cells)| cells.iter().any(|cell| !cell.is_empty()))
        .enumerate()
        .map(|(index, (source_row, mut cells))| {
            let prompt = if col < cells.len() {
                cells.swap_remove(col)
            } else {
                String::new()
            };
            PromptRow::new(index, source_row, prompt)
        })
        .collect();
    Ok(prompts)
}

fn read_csv_grid(path: &Path) -> Result<Vec<GridRow>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TableError::read(path, e))?;

    let mut grid = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::read(path, e))?;
        grid.push((idx + 1, record.iter().map(str::to_string).collect()));
    }
    Ok(grid)
}

fn read_workbook_grid(path: &Path) -> Result<Vec<GridRow>, TableError> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| TableError::read(path, e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TableError::NoSheets {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| TableError::read(path, format!("sheet '{sheet_name}': {e}")))?;

    // Data may not begin at A1; keep positions relative to the sheet.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let pad = start_col as usize;

    let grid = range
        .rows()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![String::new(); pad];
            cells.extend(row.iter().map(cell_text));
            (start_row as usize + idx + 1, cells)
        })
        .collect();
    Ok(grid)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
