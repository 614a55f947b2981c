//! 読み込み → チェック → Excel出力 の統合テスト
//!
//! 入力Excelは rust_xlsxwriter で作成し、出力は calamine で読み戻して確認する。

use calamine::{open_workbook, Data, Reader, Xlsx};
use dubletten_check::export::write_export;
use dubletten_check::loader;
use dubletten_common::{run_check, CheckRequest, Field};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 入力セル
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

fn write_input(path: &Path, header: &[&str], rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let sheet_row = r as u32 + 1;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(sheet_row, col as u16, *s).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(sheet_row, col as u16, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).unwrap();
}

fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("出力ファイルを開けない");
    let range = workbook.worksheet_range(sheet).expect("シートが無い");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).expect("出力ファイルを開けない");
    workbook.sheet_names()
}

fn input_path(dir: &Path) -> PathBuf {
    dir.join("liste.xlsx")
}

#[test]
fn test_exact_values_within_group_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(
        &input,
        &["Überordnung", "val"],
        &[
            vec![Cell::Number(1.0), Cell::Text("X")],
            vec![Cell::Number(1.0), Cell::Text("X")],
            vec![Cell::Number(1.0), Cell::Text("Y")],
            vec![Cell::Number(2.0), Cell::Text("X")],
        ],
    );

    let table = loader::load_table(&input, None).unwrap();
    let outcome = run_check(&table, &CheckRequest::exact("val")).unwrap();

    let lines: Vec<usize> = outcome.duplicates.rows().iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![0, 1]);
    // 識別子列が無いので未付与シートも無い
    assert!(outcome.without_identifier.is_empty());
}

#[test]
fn test_boersenblatt_different_years_no_duplicates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(
        &input,
        &["Digicode", "Ueberordnung", "Jahrgang", "Erscheinungsjahr"],
        &[
            vec![Cell::Text("d034"), Cell::Number(1.0), Cell::Text("A"), Cell::Number(2000.0)],
            vec![Cell::Text("d099"), Cell::Number(1.0), Cell::Text("A"), Cell::Number(2000.0)],
            vec![Cell::Text("d034"), Cell::Number(1.0), Cell::Text("B"), Cell::Number(2001.0)],
        ],
    );

    let table = loader::load_table(&input, None).unwrap();
    let outcome = run_check(&table, &CheckRequest::boersenblatt()).unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.export().unwrap().is_none());
}

#[test]
fn test_export_with_and_without_urn() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(
        &input,
        &["Überordnung", "Titel", "URN"],
        &[
            vec![Cell::Text("123"), Cell::Text("Heft 1"), Cell::Text("u1")],
            vec![Cell::Text("123"), Cell::Text("Heft 1"), Cell::Blank],
        ],
    );

    let table = loader::load_table(&input, None).unwrap();
    let outcome = run_check(&table, &CheckRequest::exact("Titel")).unwrap();
    let file = outcome.export().unwrap().expect("Duplikate erwartet");
    let path = write_export(&file, dir.path()).unwrap();

    assert_eq!(path, dir.path().join("duplicates.xlsx"));
    assert_eq!(sheet_names(&path), vec!["Duplicates", "Duplicates_without_URN"]);

    let all = read_sheet(&path, "Duplicates");
    assert_eq!(all[0], vec!["Überordnung", "Titel", "URN"]);
    assert_eq!(all.len(), 3);
    assert_eq!(all[1], vec!["123", "Heft 1", "u1"]);

    let gap = read_sheet(&path, "Duplicates_without_URN");
    assert_eq!(gap.len(), 2);
    assert_eq!(gap[1][1], "Heft 1");
    assert_eq!(gap[1].get(2).map(String::as_str).unwrap_or(""), "");
}

#[test]
fn test_year_export_one_sheet_per_group() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    let long_group = "1234567890123456789012345678901234567890";
    write_input(
        &input,
        &["Digicode", "Ueberordnung", "Jahrgang", "Erscheinungsjahr", "URN"],
        &[
            vec![Cell::Text("d034"), Cell::Text(long_group), Cell::Text("A"), Cell::Number(2000.0), Cell::Text("u1")],
            vec![Cell::Text("d034"), Cell::Number(7.0), Cell::Text("B"), Cell::Number(2001.0), Cell::Blank],
            vec![Cell::Text("d034"), Cell::Text(long_group), Cell::Text("A"), Cell::Number(2000.0), Cell::Text("u2")],
            vec![Cell::Text("d034"), Cell::Number(7.0), Cell::Text("B"), Cell::Number(2001.0), Cell::Text("u3")],
        ],
    );

    let table = loader::load_table(&input, None).unwrap();
    let outcome = run_check(&table, &CheckRequest::boersenblatt()).unwrap();
    let file = outcome.export().unwrap().expect("Duplikate erwartet");
    let path = write_export(&file, dir.path()).unwrap();

    assert_eq!(path, dir.path().join("duplicates_year.xlsx"));
    assert_eq!(
        sheet_names(&path),
        vec![&long_group[..31], "7", "Duplicates_without_URN"]
    );
    assert_eq!(read_sheet(&path, "7").len(), 3);
    assert_eq!(read_sheet(&path, "Duplicates_without_URN").len(), 2);
}

#[test]
fn test_loader_skips_blank_rows_and_keeps_row_numbers() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(
        &input,
        &["Überordnung", "Titel"],
        &[
            vec![Cell::Text("1"), Cell::Text("A")],
            vec![Cell::Blank, Cell::Blank],
            vec![Cell::Text("1"), Cell::Text("A")],
        ],
    );

    let table = loader::load_table(&input, None).unwrap();
    assert_eq!(table.len(), 2);

    let outcome = run_check(&table, &CheckRequest::exact("Titel")).unwrap();
    let rows: Vec<usize> = outcome
        .duplicates
        .rows()
        .iter()
        .map(|r| r.sheet_row_number())
        .collect();
    assert_eq!(rows, vec![2, 4]);
}

#[test]
fn test_numbers_compare_as_text() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(
        &input,
        &["Überordnung", "Jahr"],
        &[
            vec![Cell::Text("1"), Cell::Number(2000.0)],
            vec![Cell::Text("1"), Cell::Text("2000")],
        ],
    );

    let table = loader::load_table(&input, None).unwrap();
    let outcome = run_check(&table, &CheckRequest::exact("Jahr")).unwrap();
    assert_eq!(outcome.duplicates.len(), 2);
    assert_eq!(outcome.duplicates.rows()[0].fields[1], Field::Text("2000".into()));
}

#[test]
fn test_header_only_sheet_has_no_duplicates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(&input, &["Überordnung", "Titel", "URN"], &[]);

    let table = loader::load_table(&input, None).unwrap();
    assert!(table.is_empty());

    let outcome = run_check(&table, &CheckRequest::exact("Titel")).unwrap();
    assert!(outcome.is_empty());
    assert!(outcome.export().unwrap().is_none());
}

#[test]
fn test_header_only_sheet_reports_missing_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());
    write_input(&input, &["Titel"], &[]);

    let table = loader::load_table(&input, None).unwrap();
    let err = run_check(&table, &CheckRequest::boersenblatt()).unwrap_err();
    assert!(matches!(err, dubletten_common::Error::MissingColumn { .. }));
}

#[test]
fn test_loader_keeps_sheet_positions_with_blank_column_a() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    // A列は空、ヘッダーは B1:C1
    worksheet.write_string(0, 1, "Überordnung").unwrap();
    worksheet.write_string(0, 2, "Titel").unwrap();
    worksheet.write_string(1, 1, "1").unwrap();
    worksheet.write_string(1, 2, "A").unwrap();
    worksheet.write_string(3, 1, "1").unwrap();
    worksheet.write_string(3, 2, "A").unwrap();
    workbook.save(&input).unwrap();

    let table = loader::load_table(&input, None).unwrap();
    assert_eq!(table.columns(), &["Unnamed: 0", "Überordnung", "Titel"]);

    let outcome = run_check(&table, &CheckRequest::exact("Titel")).unwrap();
    let rows: Vec<usize> = outcome
        .duplicates
        .rows()
        .iter()
        .map(|r| r.sheet_row_number())
        .collect();
    assert_eq!(rows, vec![2, 4]);
}

#[test]
fn test_loader_keeps_sheet_positions_with_blank_first_row() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = input_path(dir.path());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    // 1行目が空なので列名はすべて Unnamed
    worksheet.write_string(2, 0, "x").unwrap();
    worksheet.write_string(2, 1, "y").unwrap();
    workbook.save(&input).unwrap();

    let table = loader::load_table(&input, None).unwrap();
    assert_eq!(table.columns(), &["Unnamed: 0", "Unnamed: 1"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.lines(), &[1]);
}
