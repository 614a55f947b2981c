//! 重複チェックの実行
//!
//! 読み込み済みの表とリクエストを受け取り、
//! 正規化 → (Digicode絞り込み) → グループ内重複検出 → URN未付与抽出 までを行う。
//! 入力の表は借用のみで変更しない。

use crate::duplicates::find_grouped_duplicates;
use crate::error::{Error, Result};
use crate::export::{plan_sheets, SheetLayout, SheetPlan};
use crate::identifier::{split_without_identifier, IDENTIFIER_COLUMN};
use crate::normalizer::normalize;
use crate::types::{DuplicateSet, NormalizedTable, RecordTable};
use crate::year::{
    find_year_duplicates, BOERSENBLATT_DIGICODE, DIGICODE_COLUMN, YEAR_GROUP_COLUMN,
    YEAR_KEY_COLUMNS,
};
use serde::Serialize;

/// グループ列名（完全一致モード）
pub const EXACT_GROUP_COLUMN: &str = "Überordnung";

/// 完全一致モードの出力ファイル名
pub const EXACT_FILE_NAME: &str = "duplicates.xlsx";
/// 年次照合モードの出力ファイル名
pub const YEAR_FILE_NAME: &str = "duplicates_year.xlsx";

/// チェックの種類
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum CheckMode {
    /// 指定列の値を文字単位で比較
    ExactValues { column: String },
    /// Börsenblatt: Jahrgang と Erscheinungsjahr の組で比較
    Boersenblatt,
}

impl CheckMode {
    pub fn output_file_name(&self) -> &'static str {
        match self {
            CheckMode::ExactValues { .. } => EXACT_FILE_NAME,
            CheckMode::Boersenblatt => YEAR_FILE_NAME,
        }
    }

    pub fn sheet_layout(&self) -> SheetLayout {
        match self {
            CheckMode::ExactValues { .. } => SheetLayout::Single,
            CheckMode::Boersenblatt => SheetLayout::PerGroup,
        }
    }
}

/// 1回のチェックの条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRequest {
    pub mode: CheckMode,
    pub group_column: String,
    pub identifier_column: String,
    /// 年次照合モードでのみ使用
    pub digicode: String,
}

impl CheckRequest {
    /// 完全一致モード（既定の列名）
    pub fn exact(column: impl Into<String>) -> Self {
        Self {
            mode: CheckMode::ExactValues {
                column: column.into(),
            },
            group_column: EXACT_GROUP_COLUMN.to_string(),
            identifier_column: IDENTIFIER_COLUMN.to_string(),
            digicode: BOERSENBLATT_DIGICODE.to_string(),
        }
    }

    /// 年次照合モード（既定の列名・Digicode）
    pub fn boersenblatt() -> Self {
        Self {
            mode: CheckMode::Boersenblatt,
            group_column: YEAR_GROUP_COLUMN.to_string(),
            identifier_column: IDENTIFIER_COLUMN.to_string(),
            digicode: BOERSENBLATT_DIGICODE.to_string(),
        }
    }

    /// 必須列（識別子列は任意なので含めない）
    pub fn required_columns(&self) -> Vec<&str> {
        match &self.mode {
            CheckMode::ExactValues { column } => vec![self.group_column.as_str(), column.as_str()],
            CheckMode::Boersenblatt => {
                let mut columns = vec![DIGICODE_COLUMN, self.group_column.as_str()];
                columns.extend(YEAR_KEY_COLUMNS);
                columns
            }
        }
    }

    /// 比較列
    pub fn key_columns(&self) -> Vec<&str> {
        match &self.mode {
            CheckMode::ExactValues { column } => vec![column.as_str()],
            CheckMode::Boersenblatt => YEAR_KEY_COLUMNS.to_vec(),
        }
    }

    /// 表の列に必須列がそろっているか確認
    pub fn check_columns(&self, columns: &[String]) -> Result<()> {
        require_columns(columns, &self.required_columns())
    }
}

/// 指定列がすべて存在するか確認（最初に欠けた列で MissingColumn）
pub fn require_columns(columns: &[String], names: &[&str]) -> Result<()> {
    match names.iter().find(|name| !columns.iter().any(|c| c == *name)) {
        Some(name) => Err(Error::MissingColumn {
            column: name.to_string(),
            available: columns.to_vec(),
        }),
        None => Ok(()),
    }
}

/// チェック結果
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub request: CheckRequest,
    /// 正規化前の行数
    pub total_rows: usize,
    pub duplicates: DuplicateSet,
    pub without_identifier: NormalizedTable,
}

/// 出力用のワークブック
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub sheet_names: Vec<String>,
    pub bytes: Vec<u8>,
}

impl CheckOutcome {
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// 出力予定のシート構成
    pub fn sheets(&self) -> Vec<SheetPlan> {
        plan_sheets(
            &self.duplicates,
            &self.without_identifier,
            self.request.mode.sheet_layout(),
        )
    }

    /// 重複が無ければ `None`（ファイルは作らない）
    #[cfg(feature = "excel")]
    pub fn export(&self) -> Result<Option<ExportFile>> {
        if self.is_empty() {
            return Ok(None);
        }

        let sheets = self.sheets();
        let bytes = crate::export::excel_core::generate_workbook_buffer(&sheets)?;

        Ok(Some(ExportFile {
            file_name: self.request.mode.output_file_name(),
            mime_type: crate::export::XLSX_MIME_TYPE,
            sheet_names: sheets.into_iter().map(|s| s.name).collect(),
            bytes,
        }))
    }
}

/// 重複チェックを実行
///
/// # Errors
/// 必須列が無い場合は `MissingColumn`
pub fn run_check(table: &RecordTable, request: &CheckRequest) -> Result<CheckOutcome> {
    request.check_columns(table.columns())?;
    let normalized = normalize(table);

    let duplicates = match &request.mode {
        CheckMode::ExactValues { .. } => {
            find_grouped_duplicates(&normalized, &request.group_column, &request.key_columns())?
        }
        CheckMode::Boersenblatt => {
            find_year_duplicates(&normalized, &request.digicode, &request.group_column)?
        }
    };

    let without_identifier = split_without_identifier(&duplicates, &request.identifier_column);

    log::info!(
        "チェック完了: {}行中 重複{}行, URN無し{}行",
        table.len(),
        duplicates.len(),
        without_identifier.len()
    );

    Ok(CheckOutcome {
        request: request.clone(),
        total_rows: table.len(),
        duplicates,
        without_identifier,
    })
}
