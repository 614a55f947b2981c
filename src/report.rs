//! コンソール表示
//!
//! 列診断、先頭行プレビュー、重複一覧、JSONサマリー。

use dubletten_common::{CheckOutcome, ColumnKind, NormalizedTable};
use serde::Serialize;
use std::path::Path;

/// PICA フィールド対応表（オペレーター向け）
pub const FIELD_MAPPING: &[(&str, &str)] = &[
    ("Satzart", "002@ $0"),
    ("Jahr", "011@ $a"),
    ("Überordnung", "021A $9"),
    ("Digicode", "017C $a"),
    ("Jahrgang", "021B $l"),
    ("URN", "K004U $0"),
];

/// 列ごとの値の種類を表示
pub fn print_column_kinds(kinds: &[ColumnKind]) {
    println!("Datentypen der geladenen Daten:");
    let width = kinds.iter().map(|k| k.name.chars().count()).max().unwrap_or(0);
    for kind in kinds {
        let pad = width - kind.name.chars().count();
        println!(
            "  {}{}  {} ({} leer)",
            kind.name,
            " ".repeat(pad),
            kind.kind,
            kind.empty_cells
        );
    }
}

/// 表を行番号付きでタブ区切り表示
pub fn format_rows(table: &NormalizedTable, limit: Option<usize>) -> Vec<String> {
    let mut lines = vec![format!("Zeile\t{}", table.columns().join("\t"))];
    let take = limit.unwrap_or(table.len());
    for row in table.rows().iter().take(take) {
        let fields: Vec<String> = row.fields.iter().map(|f| f.to_string()).collect();
        lines.push(format!("{}\t{}", row.sheet_row_number(), fields.join("\t")));
    }
    lines
}

/// 先頭 n 行を表示
pub fn print_preview(table: &NormalizedTable, rows: usize) {
    if rows == 0 {
        return;
    }
    println!("Daten erfolgreich geladen (erste {} Zeilen):", rows.min(table.len()));
    for line in format_rows(table, Some(rows)) {
        println!("  {}", line);
    }
    println!();
}

/// 重複一覧を表示
pub fn print_duplicates(outcome: &CheckOutcome) {
    if outcome.is_empty() {
        println!("Keine Duplikate gefunden.");
        return;
    }

    println!(
        "Folgende Duplikate wurden gefunden ({} von {} Zeilen):",
        outcome.duplicates.len(),
        outcome.total_rows
    );
    for line in format_rows(&outcome.duplicates.table, None) {
        println!("  {}", line);
    }

    if !outcome.without_identifier.is_empty() {
        println!(
            "\nDavon ohne {}: {} Zeilen",
            outcome.request.identifier_column,
            outcome.without_identifier.len()
        );
    }
}

/// PICA フィールド対応表を表示
pub fn print_field_mapping() {
    println!("Folgende Felder werden in folgender Benennung benötigt:\n");
    for (name, tag) in FIELD_MAPPING {
        println!("  {:<12} {}", format!("{}:", name), tag);
    }
}

/// JSONサマリー
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub outcome: &'a CheckOutcome,
    pub export_path: Option<String>,
    pub mime_type: Option<&'a str>,
    pub sheets: Vec<String>,
}

impl<'a> RunSummary<'a> {
    pub fn new(outcome: &'a CheckOutcome, export: Option<(&Path, &'a str, Vec<String>)>) -> Self {
        match export {
            Some((path, mime_type, sheets)) => Self {
                outcome,
                export_path: Some(path.display().to_string()),
                mime_type: Some(mime_type),
                sheets,
            },
            None => Self {
                outcome,
                export_path: None,
                mime_type: None,
                sheets: Vec::new(),
            },
        }
    }
}
