//! Liquidation template output.
//!
//! This module writes a worker's liquidation into a copy of the template
//! workbook. Cell writes go through [`SheetWriter`], which reports every
//! write that a merged range prevents instead of dropping it silently.

mod cell;
mod sink;
mod transcriber;
mod writer;
mod xlsx;

pub use cell::{CellRange, CellRef};
pub use sink::{CellSink, CellValue, MemorySheet};
pub use transcriber::{
    MISSING_DATE, SHEET_DATE_FORMAT, TranscriptionContext, output_file_name, transcribe,
};
pub use writer::{SheetWriter, SkippedCell, WriteOutcome, WriteReport};
pub use xlsx::XlsxSheet;
