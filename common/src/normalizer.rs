//! 値の正規化
//!
//! 型付きセルをすべて文字列に揃える。比較と出力はこの結果に対して行う。
//! 欠損セルは `Field::Null` として残す。

use crate::types::{CellValue, Field, NormalizedTable, RecordTable, Row};
use chrono::{NaiveDateTime, Timelike};

/// 表全体を正規化（元の表は変更しない）
pub fn normalize(table: &RecordTable) -> NormalizedTable {
    let rows = table
        .rows()
        .iter()
        .zip(table.lines())
        .map(|(cells, &line)| Row {
            line,
            fields: cells.iter().map(normalize_cell).collect(),
        })
        .collect();

    log::debug!(
        "正規化: {}行 x {}列",
        table.len(),
        table.columns().len()
    );

    NormalizedTable::new(table.columns().to_vec(), rows)
}

/// セル1つを正規化
pub fn normalize_cell(value: &CellValue) -> Field {
    match value {
        CellValue::Empty => Field::Null,
        CellValue::Text(text) => Field::Text(text.clone()),
        CellValue::Int(n) => Field::Text(n.to_string()),
        CellValue::Float(n) => Field::Text(n.to_string()),
        CellValue::Bool(b) => Field::Text(b.to_string()),
        CellValue::DateTime(dt) => Field::Text(format_datetime(dt)),
        CellValue::Error(code) => Field::Text(code.clone()),
    }
}

/// 日時を文字列化（時刻が0時ちょうどなら日付のみ）
fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.time().num_seconds_from_midnight() == 0 && dt.time().nanosecond() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
