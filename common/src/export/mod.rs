//! Export core modules shared by the CLI and library callers.
//!
//! - Single: 重複全体を `Duplicates` シートに出力
//! - PerGroup: グループ値ごとに1シート（シート名はグループ値を31文字に切り詰め）
//! - URN未付与の行があれば `Duplicates_without_URN` シートを追加

pub mod sheet_name;

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::types::{DuplicateSet, NormalizedTable};
use serde::Serialize;
use sheet_name::SheetNamer;

/// xlsx の MIME タイプ
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 単一シート出力のシート名
pub const DUPLICATES_SHEET: &str = "Duplicates";
/// URN未付与シートのシート名
pub const WITHOUT_URN_SHEET: &str = "Duplicates_without_URN";

/// シート構成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetLayout {
    /// 1シートにまとめる
    Single,
    /// グループ値ごとに分ける
    PerGroup,
}

/// 出力予定のシート
#[derive(Debug, Clone)]
pub struct SheetPlan {
    pub name: String,
    pub table: NormalizedTable,
}

/// シート名と内容を決める
pub fn plan_sheets(
    duplicates: &DuplicateSet,
    without_identifier: &NormalizedTable,
    layout: SheetLayout,
) -> Vec<SheetPlan> {
    let mut namer = SheetNamer::new();
    namer.reserve(WITHOUT_URN_SHEET);

    let mut sheets = match layout {
        SheetLayout::Single => vec![SheetPlan {
            name: namer.assign(DUPLICATES_SHEET),
            table: duplicates.table.clone(),
        }],
        SheetLayout::PerGroup => duplicates
            .groups()
            .into_iter()
            .map(|(value, table)| SheetPlan {
                name: namer.assign(&value),
                table,
            })
            .collect(),
    };

    if !without_identifier.is_empty() {
        sheets.push(SheetPlan {
            name: WITHOUT_URN_SHEET.to_string(),
            table: without_identifier.clone(),
        });
    }

    sheets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::find_grouped_duplicates;
    use crate::identifier::split_without_identifier;
    use crate::normalizer::normalize;
    use crate::types::{CellValue, RecordTable};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn duplicates(rows: Vec<(&str, &str, CellValue)>) -> DuplicateSet {
        let rows = rows
            .into_iter()
            .map(|(group, title, urn)| vec![text(group), text(title), urn])
            .collect();
        let table = normalize(&RecordTable::from_rows(
            vec!["Ueberordnung".into(), "Titel".into(), "URN".into()],
            rows,
        ));
        find_grouped_duplicates(&table, "Ueberordnung", &["Titel"]).unwrap()
    }

    fn names(sheets: &[SheetPlan]) -> Vec<&str> {
        sheets.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_single_layout_with_gap_sheet() {
        let set = duplicates(vec![("1", "X", text("u1")), ("1", "X", CellValue::Empty)]);
        let gap = split_without_identifier(&set, "URN");
        let sheets = plan_sheets(&set, &gap, SheetLayout::Single);

        assert_eq!(names(&sheets), vec![DUPLICATES_SHEET, WITHOUT_URN_SHEET]);
        assert_eq!(sheets[0].table.len(), 2);
        assert_eq!(sheets[1].table.len(), 1);
    }

    #[test]
    fn test_no_gap_sheet_when_all_have_urn() {
        let set = duplicates(vec![("1", "X", text("u1")), ("1", "X", text("u2"))]);
        let gap = split_without_identifier(&set, "URN");
        let sheets = plan_sheets(&set, &gap, SheetLayout::Single);

        assert_eq!(names(&sheets), vec![DUPLICATES_SHEET]);
    }

    #[test]
    fn test_per_group_layout() {
        let long = "a".repeat(40);
        let set = duplicates(vec![
            ("B", "X", text("u1")),
            (long.as_str(), "Y", text("u2")),
            ("B", "X", text("u3")),
            (long.as_str(), "Y", text("u4")),
        ]);
        let gap = split_without_identifier(&set, "URN");
        let sheets = plan_sheets(&set, &gap, SheetLayout::PerGroup);

        assert_eq!(names(&sheets), vec!["B", &long[..31]]);
        assert_eq!(sheets[0].table.len(), 2);
    }

    #[test]
    fn test_per_group_truncation_collision() {
        let first = format!("{}1", "g".repeat(31));
        let second = format!("{}2", "g".repeat(31));
        let set = duplicates(vec![
            (first.as_str(), "X", text("u1")),
            (first.as_str(), "X", text("u2")),
            (second.as_str(), "X", text("u3")),
            (second.as_str(), "X", text("u4")),
        ]);
        let gap = split_without_identifier(&set, "URN");
        let sheets = plan_sheets(&set, &gap, SheetLayout::PerGroup);

        assert_eq!(sheets[0].name, "g".repeat(31));
        assert_eq!(sheets[1].name, format!("{} (2)", "g".repeat(27)));
    }

    #[test]
    fn test_per_group_history_is_renamed() {
        let set = duplicates(vec![
            ("History", "X", text("u1")),
            ("History", "X", text("u2")),
        ]);
        let gap = split_without_identifier(&set, "URN");
        let sheets = plan_sheets(&set, &gap, SheetLayout::PerGroup);

        assert_eq!(names(&sheets), vec!["History (2)"]);
    }
}
