//! Roster input.
//!
//! Reads worker records from the payroll roster workbook, substituting
//! sentinels for missing identity fields and dropping unreadable dates.

mod dates;
mod reader;

pub use dates::{excel_serial_to_date, parse_roster_date};
pub use reader::{RosterReader, read_grid};
