//! グループ内重複検出
//!
//! グループ列の値ごとに行をまとめ、比較列の値（の組）が同じ行が
//! 2行以上あるものを重複として返す。別グループ同士の一致は数えない。
//!
//! ## 出力順
//! グループは初出順、グループ内は元の行順。

use crate::error::{Error, Result};
use crate::types::{DuplicateSet, NormalizedTable, Row};
use std::collections::HashMap;

/// グループ内で比較列の値が一致する行をすべて抽出
///
/// # Arguments
/// * `table` - 正規化済みの表
/// * `group_column` - グループ列名
/// * `key_columns` - 比較列名（1列以上）
///
/// # Errors
/// グループ列・比較列が表に無い場合は `MissingColumn`
pub fn find_grouped_duplicates(
    table: &NormalizedTable,
    group_column: &str,
    key_columns: &[&str],
) -> Result<DuplicateSet> {
    let group_idx = table.require_column(group_column)?;
    if key_columns.is_empty() {
        return Err(Error::NoKeyColumns);
    }
    let key_idx = key_columns
        .iter()
        .map(|column| table.require_column(column))
        .collect::<Result<Vec<_>>>()?;

    let groups = group_rows(table, group_idx);
    let group_count = groups.len();

    let rows: Vec<Row> = groups
        .into_iter()
        .flat_map(|(_, members)| duplicates_within(members, &key_idx))
        .cloned()
        .collect();

    log::debug!(
        "重複検出: {}グループ中 {}行が重複 (グループ列: {}, 比較列: {})",
        group_count,
        rows.len(),
        group_column,
        key_columns.join(" + ")
    );

    Ok(DuplicateSet {
        group_column: group_column.to_string(),
        key_columns: key_columns.iter().map(|c| c.to_string()).collect(),
        table: NormalizedTable::new(table.columns().to_vec(), rows),
    })
}

/// グループ値ごとに行をまとめる（グループは初出順、グループ内は元の順）
pub(crate) fn group_rows(table: &NormalizedTable, group_idx: usize) -> Vec<(&str, Vec<&Row>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Row>)> = Vec::new();

    for row in table.rows() {
        let value = row.fields[group_idx].as_text();
        match positions.get(value) {
            Some(&pos) => groups[pos].1.push(row),
            None => {
                positions.insert(value, groups.len());
                groups.push((value, vec![row]));
            }
        }
    }

    groups
}

/// 1グループ内で比較キーが2回以上出現する行
fn duplicates_within<'a>(members: Vec<&'a Row>, key_idx: &[usize]) -> Vec<&'a Row> {
    if members.len() < 2 {
        return Vec::new();
    }

    let key_of = |row: &'a Row| -> Vec<&'a str> {
        key_idx.iter().map(|&idx| row.fields[idx].as_text()).collect()
    };

    let mut counts: HashMap<Vec<&str>, usize> = HashMap::new();
    for &row in &members {
        *counts.entry(key_of(row)).or_default() += 1;
    }

    members
        .into_iter()
        .filter(|&row| counts.get(&key_of(row)).copied().unwrap_or(0) >= 2)
        .collect()
}
