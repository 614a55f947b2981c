//! Dublettencheck Common Library
//!
//! 書誌データ表のグループ内重複検出と、その結果のExcel出力。
//! CLIからもライブラリ利用者からも同じ関数を使う。

pub mod check;
pub mod duplicates;
pub mod error;
pub mod export;
pub mod identifier;
pub mod normalizer;
pub mod types;
pub mod year;

pub use check::{require_columns, run_check, CheckMode, CheckOutcome, CheckRequest, ExportFile};
pub use duplicates::find_grouped_duplicates;
pub use error::{Error, Result};
pub use export::{plan_sheets, SheetLayout, SheetPlan, XLSX_MIME_TYPE};
pub use identifier::split_without_identifier;
pub use normalizer::normalize;
pub use types::{CellValue, ColumnKind, DuplicateSet, Field, NormalizedTable, RecordTable, Row, ValueKind};
pub use year::{filter_by_digicode, find_year_duplicates};
