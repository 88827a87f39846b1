//! Result-reporting cell writes.
//!
//! Every write either lands or is recorded as skipped. A coordinate covered
//! by a merged range, other than the range's top-left anchor, is not
//! writable and is skipped.

use serde::Serialize;
use tracing::debug;

use crate::config::FontSpec;
use crate::error::LiquidationResult;

use super::cell::{CellRange, CellRef};
use super::sink::{CellSink, CellValue};

/// What happened to a single write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was written.
    Written,
    /// The target lies inside `range` and is not its anchor.
    SkippedMerged {
        /// The merged range covering the target.
        range: CellRange,
    },
}

/// A write that did not land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCell {
    /// The target coordinate.
    pub cell: String,
    /// The merged range covering it.
    pub range: String,
    /// The value that was not written.
    pub value: CellValue,
}

/// The outcome of a batch of writes to one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Number of cells written.
    pub written: usize,
    /// Writes skipped because of merged ranges.
    pub skipped: Vec<SkippedCell>,
}

impl WriteReport {
    /// Returns true if every write landed.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Writes styled values to a [`CellSink`], recording every outcome.
///
/// # Example
///
/// ```
/// use liquidation_engine::config::FontSpec;
/// use liquidation_engine::template::{MemorySheet, SheetWriter, WriteOutcome};
///
/// let mut sheet = MemorySheet::with_merged(&["D105:G105"]).unwrap();
/// let mut writer = SheetWriter::new(&mut sheet, FontSpec::default());
///
/// let anchor = writer.write("D105".parse().unwrap(), "Por Días").unwrap();
/// let inner = writer.write("E105".parse().unwrap(), "lost").unwrap();
/// assert_eq!(anchor, WriteOutcome::Written);
/// assert!(matches!(inner, WriteOutcome::SkippedMerged { .. }));
///
/// let report = writer.finish();
/// assert_eq!(report.written, 1);
/// assert_eq!(report.skipped[0].cell, "E105");
/// ```
pub struct SheetWriter<'a, S: CellSink + ?Sized> {
    sink: &'a mut S,
    font: FontSpec,
    merged: Vec<CellRange>,
    report: WriteReport,
}

impl<'a, S: CellSink + ?Sized> SheetWriter<'a, S> {
    /// Creates a writer over `sink` using `font` for every cell.
    pub fn new(sink: &'a mut S, font: FontSpec) -> Self {
        let merged = sink.merged_ranges();
        Self {
            sink,
            font,
            merged,
            report: WriteReport::default(),
        }
    }

    /// Writes `value` to `cell` unless a merged range covers it.
    ///
    /// Errors from the sink are propagated; a skipped write is not an error.
    pub fn write(
        &mut self,
        cell: CellRef,
        value: impl Into<CellValue>,
    ) -> LiquidationResult<WriteOutcome> {
        let value = value.into();

        if let Some(range) = self
            .merged
            .iter()
            .find(|r| r.contains(cell) && !r.is_anchor(cell))
            .copied()
        {
            debug!(%cell, %range, "Skipping write into merged range");
            self.report.skipped.push(SkippedCell {
                cell: cell.to_string(),
                range: range.to_string(),
                value,
            });
            return Ok(WriteOutcome::SkippedMerged { range });
        }

        self.sink.write_cell(cell, &value, &self.font)?;
        self.report.written += 1;
        Ok(WriteOutcome::Written)
    }

    /// Ends the batch and returns its report.
    pub fn finish(self) -> WriteReport {
        self.report
    }
}
