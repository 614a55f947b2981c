//! URN 未付与の重複抽出

use crate::types::{DuplicateSet, NormalizedTable};

/// 識別子列名
pub const IDENTIFIER_COLUMN: &str = "URN";

/// 重複のうち識別子が欠損している行
///
/// 識別子列が無い表では空を返す（エラーにはしない）。
/// 欠損の判定は `Field::Null` で行い、"nan" という文字列の URN は欠損扱いしない。
pub fn split_without_identifier(duplicates: &DuplicateSet, identifier_column: &str) -> NormalizedTable {
    let Some(idx) = duplicates.table.column_index(identifier_column) else {
        log::debug!("識別子列 '{}' が無いため未付与チェックを省略", identifier_column);
        return duplicates.table.empty_like();
    };

    duplicates.table.filter_rows(|row| row.fields[idx].is_null())
}
