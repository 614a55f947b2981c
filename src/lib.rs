//! Dublettencheck CLI
//!
//! Excelリストを読み込み、グループ内の重複を検出してExcelに書き出す。
//! 検出ロジックは `dubletten_common` にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod prompt;
pub mod report;

pub use error::{DublettenError, Result};
