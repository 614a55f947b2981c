//! 対話式の列選択

use crate::error::{DublettenError, Result};
use dialoguer::Select;

/// 比較する列を選ぶ（グループ列は候補から外す）
pub fn select_column(columns: &[String], group_column: &str) -> Result<String> {
    let candidates = selectable_columns(columns, group_column);
    if candidates.is_empty() {
        return Err(DublettenError::EmptyInput("keine Spalten zur Auswahl".into()));
    }

    let index = Select::new()
        .with_prompt("Wählen Sie die zu überprüfende Spalte")
        .items(&candidates)
        .default(0)
        .interact()
        .map_err(|e| DublettenError::Prompt(e.to_string()))?;

    Ok(candidates[index].clone())
}

fn selectable_columns(columns: &[String], group_column: &str) -> Vec<String> {
    columns
        .iter()
        .filter(|c| c.as_str() != group_column)
        .cloned()
        .collect()
}
