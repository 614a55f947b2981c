//! Excel読み込み（calamine）
//!
//! 1行目をヘッダーとして RecordTable に変換する。
//! - 空のヘッダーは `Unnamed: <列番号>`
//! - 同名ヘッダーは2つ目以降に `.1`, `.2` を付ける
//! - 全セルが空の行は読み飛ばす（行位置は数える）

use crate::error::{DublettenError, Result};
use calamine::{Data, Reader, Xlsx};
use dubletten_common::normalizer::normalize_cell;
use dubletten_common::{CellValue, RecordTable};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// ファイルから表を読み込み
///
/// `sheet` を省略すると最初のシートを使う。
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<RecordTable> {
    if !path.exists() {
        return Err(DublettenError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    log::debug!("Datei gelesen: {} ({} bytes)", path.display(), bytes.len());
    load_table_from_bytes(bytes, sheet)
}

/// バイト列から表を読み込み（アップロードされたデータ向け）
pub fn load_table_from_bytes(bytes: Vec<u8>, sheet: Option<&str>) -> Result<RecordTable> {
    let mut workbook = open_workbook(bytes)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DublettenError::EmptyInput("keine Tabellenblätter".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| DublettenError::InputParse(format!("Tabellenblatt '{}': {}", sheet_name, e)))?;

    // Range は最初の非空セルから始まるので、シート上の位置に戻す
    let Some((start_row, start_col)) = range.start() else {
        return Err(DublettenError::EmptyInput(format!("Tabellenblatt '{}' ist leer", sheet_name)));
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let to_cells = |row: &[Data]| -> Vec<CellValue> {
        let mut cells = vec![CellValue::Empty; start_col];
        cells.extend(row.iter().map(cell_value));
        cells
    };

    let mut rows = range.rows();
    let header = if start_row == 0 {
        rows.next().map(|row| to_cells(row)).unwrap_or_default()
    } else {
        vec![CellValue::Empty; start_col + range.width()]
    };
    // 1行目がヘッダー、データ行は2行目 (line 0) から
    let first_line = start_row.saturating_sub(1);

    let mut table = RecordTable::new(header_names(&header));
    let mut skipped = 0;

    for (offset, row) in rows.enumerate() {
        let cells = to_cells(row);
        if cells.iter().all(CellValue::is_empty) {
            skipped += 1;
            continue;
        }
        table.push_row_at(first_line + offset, cells);
    }

    if skipped > 0 {
        log::debug!("{} leere Zeilen übersprungen", skipped);
    }
    log::info!(
        "Tabellenblatt '{}' geladen: {} Zeilen, {} Spalten",
        sheet_name,
        table.len(),
        table.columns().len()
    );

    Ok(table)
}

/// シート名一覧
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(DublettenError::FileNotFound(path.display().to_string()));
    }
    let workbook = open_workbook(std::fs::read(path)?)?;
    Ok(workbook.sheet_names())
}

fn open_workbook(bytes: Vec<u8>) -> Result<Xlsx<Cursor<Vec<u8>>>> {
    Xlsx::new(Cursor::new(bytes)).map_err(|e| DublettenError::InputParse(e.to_string()))
}

/// calamine のセル値を変換
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(n) => CellValue::Int(*n),
        Data::Float(n) => CellValue::Float(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if dt.is_datetime() => CellValue::DateTime(value),
            _ => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// ヘッダー行から列名を作る
fn header_names(header: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(idx, data)| {
            let field = normalize_cell(data);
            let base = if field.is_null() {
                format!("Unnamed: {}", idx)
            } else {
                field.as_text().to_string()
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}
