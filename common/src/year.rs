//! Börsenblatt: 年次照合
//!
//! Digicode が指定コードの行だけを対象に、
//! (Jahrgang, Erscheinungsjahr) の組でグループ内重複を検出する。
//! 同じ号が別の年に重複納品されたケースを見つけるためのもの。

use crate::duplicates::find_grouped_duplicates;
use crate::error::Result;
use crate::types::{DuplicateSet, NormalizedTable};

/// Digicode 列名
pub const DIGICODE_COLUMN: &str = "Digicode";
/// Börsenblatt の Digicode
pub const BOERSENBLATT_DIGICODE: &str = "d034";
/// グループ列名（年次照合モード）
pub const YEAR_GROUP_COLUMN: &str = "Ueberordnung";
/// 号・巻次
pub const EDITION_COLUMN: &str = "Jahrgang";
/// 刊行年
pub const PUBLICATION_YEAR_COLUMN: &str = "Erscheinungsjahr";

/// 比較キー（2列の組）
pub const YEAR_KEY_COLUMNS: [&str; 2] = [EDITION_COLUMN, PUBLICATION_YEAR_COLUMN];

/// Digicode が完全一致する行だけを残す
pub fn filter_by_digicode(table: &NormalizedTable, digicode: &str) -> Result<NormalizedTable> {
    let idx = table.require_column(DIGICODE_COLUMN)?;
    let filtered = table.filter_rows(|row| row.fields[idx].as_text() == digicode);

    log::debug!(
        "Digicode '{}' で絞り込み: {}行 → {}行",
        digicode,
        table.len(),
        filtered.len()
    );

    Ok(filtered)
}

/// 年次照合の重複検出
pub fn find_year_duplicates(
    table: &NormalizedTable,
    digicode: &str,
    group_column: &str,
) -> Result<DuplicateSet> {
    let filtered = filter_by_digicode(table, digicode)?;
    find_grouped_duplicates(&filtered, group_column, &YEAR_KEY_COLUMNS)
}
