use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::collector::AnswerSet;

use super::error::TableError;
use super::format::OutputFormat;
use super::reader::PROMPT_COLUMN;

/// Longest string Excel accepts in a single cell.
const XLSX_MAX_CELL_CHARS: usize = 32_767;
const PROMPT_COLUMN_WIDTH: f64 = 50.0;
const ANSWER_COLUMN_WIDTH: f64 = 40.0;

/// Names of the answer columns: `{prefix}1` through `{prefix}{attempts}`.
pub fn answer_columns(attempts: usize, prefix: &str) -> Vec<String> {
    (1..=attempts).map(|i| format!("{prefix}{i}")).collect()
}

/// Writes one row per answer set: the prompt followed by each attempt.
///
/// The format follows the file extension (`.csv` or `.xlsx`).
pub fn write_answers(
    path: &Path,
    sets: &[AnswerSet],
    attempts: usize,
    prefix: &str,
) -> Result<(), TableError> {
    let mut header = vec![PROMPT_COLUMN.to_string()];
    header.extend(answer_columns(attempts, prefix));

    let rows: Vec<Vec<&str>> = sets
        .iter()
        .map(|set| {
            let mut cells = Vec::with_capacity(attempts + 1);
            cells.push(set.prompt.as_str());
            cells.extend(
                (0..attempts).map(|i| set.answers.get(i).map(|a| a.as_str()).unwrap_or("")),
            );
            cells
        })
        .collect();

    match OutputFormat::from_path(path)? {
        OutputFormat::Csv => write_csv(path, &header, &rows),
        OutputFormat::Xlsx => write_xlsx(path, &header, &rows),
    }
}

fn write_csv(path: &Path, header: &[String], rows: &[Vec<&str>]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, header: &[String], rows: &[Vec<&str>]) -> Result<(), TableError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &bold)?;
        let width = if col == 0 {
            PROMPT_COLUMN_WIDTH
        } else {
            ANSWER_COLUMN_WIDTH
        };
        worksheet.set_column_width(col as u16, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            let value = clamp_cell(value, row_num, col);
            worksheet.write_string_with_format(row_num, col as u16, value, &wrap)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn clamp_cell(value: &str, row: u32, col: usize) -> &str {
    match value.char_indices().nth(XLSX_MAX_CELL_CHARS) {
        Some((cut, _)) => {
            log::warn!("Cell at row {row}, column {col} truncated to {XLSX_MAX_CELL_CHARS} characters");
            &value[..cut]
        }
        None => value,
    }
}

#[cfg(test)]
#[path = "writer/tests.rs"]
mod tests;
