//! The sheet abstraction the transcriber writes into.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::FontSpec;
use crate::error::LiquidationResult;

use super::cell::{CellRange, CellRef};

/// A value written to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Literal text.
    Text(String),
    /// A numeric amount.
    Number(Decimal),
}

impl CellValue {
    /// The text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// The amount, if this is a numeric value.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

/// A worksheet that accepts styled cell writes.
///
/// Implemented by [`XlsxSheet`](super::XlsxSheet) for real workbooks and by
/// [`MemorySheet`] for tests and previews.
pub trait CellSink {
    /// The merged ranges of the sheet.
    fn merged_ranges(&self) -> Vec<CellRange>;

    /// Writes `value` to `cell` in `font`.
    fn write_cell(&mut self, cell: CellRef, value: &CellValue, font: &FontSpec)
        -> LiquidationResult<()>;
}

/// An in-memory sheet.
///
/// # Example
///
/// ```
/// use liquidation_engine::config::FontSpec;
/// use liquidation_engine::template::{CellSink, CellValue, MemorySheet};
///
/// let mut sheet = MemorySheet::with_merged(&["D105:G105"]).unwrap();
/// sheet
///     .write_cell("J16".parse().unwrap(), &CellValue::from("ROSA"), &FontSpec::default())
///     .unwrap();
///
/// assert_eq!(sheet.text("J16"), Some("ROSA"));
/// assert_eq!(sheet.merged_ranges().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    cells: BTreeMap<CellRef, (CellValue, FontSpec)>,
    merged: Vec<CellRange>,
}

impl MemorySheet {
    /// Creates an empty sheet with no merged ranges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sheet with the given merged ranges.
    pub fn with_merged(ranges: &[&str]) -> LiquidationResult<Self> {
        let merged = ranges
            .iter()
            .map(|r| r.parse())
            .collect::<LiquidationResult<Vec<CellRange>>>()?;
        Ok(Self {
            cells: BTreeMap::new(),
            merged,
        })
    }

    /// The value at `cell`, if written.
    pub fn get(&self, cell: &str) -> Option<&CellValue> {
        let cell: CellRef = cell.parse().ok()?;
        self.cells.get(&cell).map(|(value, _)| value)
    }

    /// The text at `cell`, if a text value was written.
    pub fn text(&self, cell: &str) -> Option<&str> {
        self.get(cell).and_then(CellValue::as_text)
    }

    /// The amount at `cell`, if a numeric value was written.
    pub fn number(&self, cell: &str) -> Option<Decimal> {
        self.get(cell).and_then(CellValue::as_number)
    }

    /// The font `cell` was written in.
    pub fn font(&self, cell: &str) -> Option<&FontSpec> {
        let cell: CellRef = cell.parse().ok()?;
        self.cells.get(&cell).map(|(_, font)| font)
    }

    /// Number of written cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellSink for MemorySheet {
    fn merged_ranges(&self) -> Vec<CellRange> {
        self.merged.clone()
    }

    fn write_cell(
        &mut self,
        cell: CellRef,
        value: &CellValue,
        font: &FontSpec,
    ) -> LiquidationResult<()> {
        self.cells.insert(cell, (value.clone(), font.clone()));
        Ok(())
    }
}
