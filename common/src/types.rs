//! 表データの型定義
//!
//! CLIと出力処理で共有される型:
//! - RecordTable: 読み込み直後の表（セルは型付き）
//! - NormalizedTable: 文字列化した表（比較・出力はすべてこちら）
//! - DuplicateSet: グループ内重複の検出結果

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// 欠損値を比較用テキストにしたときの表記
pub const NULL_PLACEHOLDER: &str = "nan";

/// 読み込み直後のセル値
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Excelのエラー値（#N/A など）
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Empty => ValueKind::Empty,
            CellValue::Text(_) => ValueKind::Text,
            CellValue::Int(_) | CellValue::Float(_) => ValueKind::Number,
            CellValue::Bool(_) => ValueKind::Boolean,
            CellValue::DateTime(_) => ValueKind::DateTime,
            CellValue::Error(_) => ValueKind::Error,
        }
    }
}

/// 列に含まれる値の種類（正規化前の診断用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Empty,
    Text,
    Number,
    Boolean,
    DateTime,
    Error,
    /// 複数の種類が混在
    Mixed,
}

impl ValueKind {
    /// 列の種類に値の種類を合成（空セルは種類を変えない）
    fn merge(self, other: ValueKind) -> ValueKind {
        match (self, other) {
            (ValueKind::Empty, k) | (k, ValueKind::Empty) => k,
            (a, b) if a == b => a,
            _ => ValueKind::Mixed,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Empty => write!(f, "leer"),
            ValueKind::Text => write!(f, "Text"),
            ValueKind::Number => write!(f, "Zahl"),
            ValueKind::Boolean => write!(f, "Wahrheitswert"),
            ValueKind::DateTime => write!(f, "Datum"),
            ValueKind::Error => write!(f, "Fehlerwert"),
            ValueKind::Mixed => write!(f, "gemischt"),
        }
    }
}

/// 列診断の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnKind {
    pub name: String,
    pub kind: ValueKind,
    /// 空セルの数
    pub empty_cells: usize,
}

/// 読み込み直後の表
///
/// すべての行は列数と同じ長さに揃えられる。
/// 各行はヘッダー下からの行位置（空行も数える）を持つ。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    lines: Vec<usize>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// 直前の行の次の位置に行を追加
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        let line = self.lines.last().map_or(0, |last| last + 1);
        self.push_row_at(line, row);
    }

    /// 行位置を指定して追加（足りないセルは空、余分なセルは切り捨て）
    pub fn push_row_at(&mut self, line: usize, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
        self.lines.push(line);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 各行の行位置
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 列ごとの値の種類を集計
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let mut kind = ValueKind::Empty;
                let mut empty_cells = 0;
                for row in &self.rows {
                    let value = &row[idx];
                    if value.is_empty() {
                        empty_cells += 1;
                    }
                    kind = kind.merge(value.kind());
                }
                ColumnKind {
                    name: name.clone(),
                    kind,
                    empty_cells,
                }
            })
            .collect()
    }
}

impl From<&NormalizedTable> for RecordTable {
    fn from(table: &NormalizedTable) -> Self {
        let mut record = RecordTable::new(table.columns.clone());
        for row in &table.rows {
            let cells = row
                .fields
                .iter()
                .map(|field| match field {
                    Field::Null => CellValue::Empty,
                    Field::Text(text) => CellValue::Text(text.clone()),
                })
                .collect();
            record.push_row_at(row.line, cells);
        }
        record
    }
}

/// 文字列化したセル
///
/// 欠損値は `Null` のまま保持し、比較時だけ [`NULL_PLACEHOLDER`] として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Field {
    Null,
    Text(String),
}

impl Field {
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// 比較に使うテキスト
    pub fn as_text(&self) -> &str {
        match self {
            Field::Null => NULL_PLACEHOLDER,
            Field::Text(text) => text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// 正規化済みの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 元データでの行位置（ヘッダー直下が0）
    pub line: usize,
    pub fields: Vec<Field>,
}

impl Row {
    /// 表計算ソフト上の行番号（ヘッダーが1行目）
    pub fn sheet_row_number(&self) -> usize {
        self.line + 2
    }
}

/// 正規化済みの表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl NormalizedTable {
    /// 各行を列数に揃える（足りないセルは Null、余分なセルは切り捨て）
    pub fn new(columns: Vec<String>, mut rows: Vec<Row>) -> Self {
        for row in &mut rows {
            row.fields.resize(columns.len(), Field::Null);
        }
        Self { columns, rows }
    }

    /// 列構成だけ同じ空の表
    pub fn empty_like(&self) -> Self {
        Self::new(self.columns.clone(), Vec::new())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 列位置を取得（無ければ MissingColumn）
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
            available: self.columns.clone(),
        })
    }

    /// 条件に合う行だけを残した新しい表
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Row) -> bool,
    {
        let rows = self.rows.iter().filter(|r| predicate(r)).cloned().collect();
        Self::new(self.columns.clone(), rows)
    }
}

/// グループ内重複の検出結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSet {
    pub group_column: String,
    pub key_columns: Vec<String>,
    pub table: NormalizedTable,
}

impl DuplicateSet {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        self.table.rows()
    }

    /// グループ値ごとの部分表（初出順）
    pub fn groups(&self) -> Vec<(String, NormalizedTable)> {
        let Some(group_idx) = self.table.column_index(&self.group_column) else {
            return Vec::new();
        };
        crate::duplicates::group_rows(&self.table, group_idx)
            .into_iter()
            .map(|(value, rows)| {
                let rows = rows.into_iter().cloned().collect();
                (value.to_string(), NormalizedTable::new(self.table.columns().to_vec(), rows))
            })
            .collect()
    }
}
