//! `.xlsx` workbooks through umya-spreadsheet.

use rust_decimal::prelude::ToPrimitive;
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

use crate::config::FontSpec;
use crate::error::{LiquidationError, LiquidationResult};

use super::cell::{CellRange, CellRef};
use super::sink::{CellSink, CellValue};

/// The active worksheet of an `.xlsx` workbook.
pub struct XlsxSheet {
    book: Spreadsheet,
}

impl XlsxSheet {
    /// Opens the template at `path`.
    ///
    /// Returns `TemplateNotFound` if the file does not exist and
    /// `WorkbookError` if it cannot be read as a workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> LiquidationResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LiquidationError::TemplateNotFound {
                path: path.display().to_string(),
            });
        }

        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            LiquidationError::WorkbookError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self { book })
    }

    /// Wraps an already loaded workbook.
    pub fn from_book(book: Spreadsheet) -> Self {
        Self { book }
    }

    /// Saves the workbook to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LiquidationResult<()> {
        let path = path.as_ref();
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|e| {
            LiquidationError::WorkbookError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })
    }

    /// The displayed value of `cell` on the active sheet.
    pub fn value(&self, cell: CellRef) -> String {
        self.book.get_active_sheet().get_value((cell.col, cell.row))
    }
}

impl CellSink for XlsxSheet {
    fn merged_ranges(&self) -> Vec<CellRange> {
        self.book
            .get_active_sheet()
            .get_merge_cells()
            .iter()
            .filter_map(|range| range.get_range().parse().ok())
            .collect()
    }

    fn write_cell(
        &mut self,
        cell: CellRef,
        value: &CellValue,
        font: &FontSpec,
    ) -> LiquidationResult<()> {
        let target = self
            .book
            .get_active_sheet_mut()
            .get_cell_mut((cell.col, cell.row));

        match value {
            CellValue::Text(text) => {
                target.set_value_string(text.as_str());
            }
            CellValue::Number(amount) => {
                let number = amount.to_f64().ok_or_else(|| LiquidationError::CalculationError {
                    message: format!("{} cannot be written as a number to {}", amount, cell),
                })?;
                target.set_value_number(number);
            }
        }

        target
            .get_style_mut()
            .get_font_mut()
            .set_name(font.name.as_str())
            .set_size(font.size);

        Ok(())
    }
}
