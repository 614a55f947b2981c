//! 重複一覧のExcel生成（rust_xlsxwriter）
//!
//! シート構成は [`super::plan_sheets`] で決め、ここでは書き込みだけを行う。

use super::{plan_sheets, SheetLayout, SheetPlan};
use crate::error::{Error, Result};
use crate::types::{DuplicateSet, Field, NormalizedTable};
use rust_xlsxwriter::*;

/// ワークブックをバッファに生成
///
/// # Arguments
/// * `sheets` - [`plan_sheets`] の結果
pub fn generate_workbook_buffer(sheets: &[SheetPlan]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| Error::Export(format!("sheet name '{}': {}", sheet.name, e)))?;

        write_table(worksheet, &sheet.table, &header_format)
            .map_err(|e| Error::Export(format!("sheet '{}': {}", sheet.name, e)))?;

        log::debug!("シート出力: {} ({}行)", sheet.name, sheet.table.len());
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("save: {}", e)))
}

/// ヘッダー行 + データ行を書き込み（欠損セルは空欄）
fn write_table(
    worksheet: &mut Worksheet,
    table: &NormalizedTable,
    header_format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, header_format)?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let sheet_row = idx as u32 + 1;
        for (col, field) in row.fields.iter().enumerate() {
            if let Field::Text(text) = field {
                worksheet.write_string(sheet_row, col as u16, text)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}

/// 重複一覧のExcelを生成
pub fn generate_duplicates_workbook(
    duplicates: &DuplicateSet,
    without_identifier: &NormalizedTable,
    layout: SheetLayout,
) -> Result<Vec<u8>> {
    let sheets = plan_sheets(duplicates, without_identifier, layout);
    generate_workbook_buffer(&sheets)
}
