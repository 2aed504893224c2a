use std::fs;

use calamine::{open_workbook_auto, Data, Reader};
use tempfile::tempdir;

use super::*;
use crate::collector::Answer;

fn sample_sets() -> Vec<AnswerSet> {
    vec![
        AnswerSet {
            prompt: "Hello".to_string(),
            answers: vec![
                Answer::Text("echo:Hello:1".to_string()),
                Answer::Failed("API_ERROR: HTTP error: timeout".to_string()),
            ],
        },
        AnswerSet {
            prompt: "Line one\nline two, with comma".to_string(),
            answers: vec![
                Answer::Text("a".to_string()),
                Answer::Text("b".to_string()),
            ],
        },
    ]
}

#[test]
fn answer_columns_are_one_based() {
    assert_eq!(answer_columns(3, "Response_"), ["Response_1", "Response_2", "Response_3"]);
    assert_eq!(answer_columns(2, "Answer "), ["Answer 1", "Answer 2"]);
    assert!(answer_columns(0, "x").is_empty());
}

#[test]
fn csv_output_has_prompt_then_answer_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("answers.csv");

    write_answers(&path, &sample_sets(), 2, "Answer ").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Prompt,Answer 1,Answer 2\n\
         Hello,echo:Hello:1,API_ERROR: HTTP error: timeout\n\
         \"Line one\nline two, with comma\",a,b\n"
    );
}

#[test]
fn xlsx_output_reads_back_with_same_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("answers.xlsx");

    write_answers(&path, &sample_sets(), 2, "Response_").unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&name).unwrap();
    assert_eq!(range.get_size(), (3, 3));

    let cell = |r: u32, c: u32| match range.get_value((r, c)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("unexpected cell {other:?}"),
    };
    assert_eq!(cell(0, 0), "Prompt");
    assert_eq!(cell(0, 1), "Response_1");
    assert_eq!(cell(0, 2), "Response_2");
    assert_eq!(cell(1, 1), "echo:Hello:1");
    assert_eq!(cell(1, 2), "API_ERROR: HTTP error: timeout");
    assert_eq!(cell(2, 0), "Line one\nline two, with comma");
}

#[test]
fn unsupported_extension_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("answers.txt");

    let err = write_answers(&path, &sample_sets(), 2, "Answer ").unwrap_err();

    assert!(matches!(err, TableError::UnsupportedFormat { .. }));
    assert!(!path.exists());
}

#[test]
fn oversized_cells_are_clamped() {
    let long = "x".repeat(XLSX_MAX_CELL_CHARS + 10);
    assert_eq!(clamp_cell(&long, 1, 1).len(), XLSX_MAX_CELL_CHARS);
    assert_eq!(clamp_cell("short", 1, 1), "short");
}
