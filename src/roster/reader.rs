//! Roster workbook reading.

use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::config::RosterColumns;
use crate::error::{LiquidationError, LiquidationResult};
use crate::models::{MISSING_CODE, MISSING_NAME, WorkerRecord};

use super::dates::parse_roster_date;

/// Reads worker records from a roster grid.
///
/// The grid has `header_rows` rows of preamble, then a row of column names,
/// then one worker per row.
///
/// # Example
///
/// ```
/// use liquidation_engine::config::RosterColumns;
/// use liquidation_engine::roster::RosterReader;
///
/// let columns = RosterColumns::default();
/// let reader = RosterReader::new(&columns, 0);
/// let rows = vec![
///     columns.all().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
///     vec!["40123456.0", "QUISPE MAMANI ROSA", "AUXILIAR", "01/11/2024", "", "1500"]
///         .into_iter()
///         .map(String::from)
///         .collect(),
/// ];
///
/// let workers = reader.parse_rows(&rows).unwrap();
/// assert_eq!(workers[0].code, "40123456");
/// assert!(workers[0].termination_date.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RosterReader<'a> {
    columns: &'a RosterColumns,
    header_rows: usize,
}

struct ColumnIndex {
    code: usize,
    name: usize,
    position: usize,
    hire_date: usize,
    termination_date: usize,
    base_salary: usize,
}

impl<'a> RosterReader<'a> {
    /// Creates a reader for the given column names and preamble length.
    pub fn new(columns: &'a RosterColumns, header_rows: usize) -> Self {
        Self {
            columns,
            header_rows,
        }
    }

    /// Reads the active sheet of the workbook at `path`.
    ///
    /// Returns `RosterNotFound` if the file does not exist, `RosterReadError`
    /// if it is not a readable workbook and `MissingColumn` if a configured
    /// column is absent.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> LiquidationResult<Vec<WorkerRecord>> {
        let grid = read_grid(path.as_ref())?;
        self.parse_rows(&grid)
    }

    /// Parses worker records from a grid of cell texts.
    pub fn parse_rows(&self, rows: &[Vec<String>]) -> LiquidationResult<Vec<WorkerRecord>> {
        let header = rows.get(self.header_rows).map(Vec::as_slice).unwrap_or(&[]);
        let index = self.index_columns(header)?;

        let workers: Vec<WorkerRecord> = rows
            .iter()
            .skip(self.header_rows + 1)
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| self.parse_row(row, &index))
            .collect();

        debug!(workers = workers.len(), "Roster parsed");
        Ok(workers)
    }

    fn index_columns(&self, header: &[String]) -> LiquidationResult<ColumnIndex> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name.trim())
                .ok_or_else(|| LiquidationError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(ColumnIndex {
            code: find(&self.columns.code)?,
            name: find(&self.columns.name)?,
            position: find(&self.columns.position)?,
            hire_date: find(&self.columns.hire_date)?,
            termination_date: find(&self.columns.termination_date)?,
            base_salary: find(&self.columns.base_salary)?,
        })
    }

    fn parse_row(&self, row: &[String], index: &ColumnIndex) -> WorkerRecord {
        let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");

        let code = normalize_code(cell(index.code));
        let name = match cell(index.name) {
            "" => MISSING_NAME.to_string(),
            name => name.to_string(),
        };

        let hire_date = date_or_warn(cell(index.hire_date), &name, "hire date");
        let termination_date = date_or_warn(cell(index.termination_date), &name, "termination date");

        let base_salary = parse_salary(cell(index.base_salary)).unwrap_or_else(|| {
            warn!(worker = %name, value = cell(index.base_salary), "Invalid base salary, using 0");
            Decimal::ZERO
        });

        WorkerRecord {
            code,
            name,
            position: cell(index.position).to_string(),
            hire_date,
            termination_date,
            base_salary,
        }
    }
}

fn date_or_warn(raw: &str, worker: &str, field: &str) -> Option<chrono::NaiveDate> {
    parse_roster_date(raw).unwrap_or_else(|err| {
        warn!(worker = %worker, field, error = %err, "Unreadable roster date");
        None
    })
}

/// Normalizes a worker code: numeric codes lose a trailing `.0`, blanks
/// become [`MISSING_CODE`].
fn normalize_code(raw: &str) -> String {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return MISSING_CODE.to_string();
    }
    match raw.strip_suffix(".0") {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.to_string()
        }
        _ => raw.to_string(),
    }
}

fn parse_salary(raw: &str) -> Option<Decimal> {
    let cleaned = raw.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Reads the active sheet of an `.xlsx` workbook as rows of cell texts.
pub fn read_grid(path: &Path) -> LiquidationResult<Vec<Vec<String>>> {
    if !path.is_file() {
        return Err(LiquidationError::RosterNotFound {
            path: path.display().to_string(),
        });
    }

    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        LiquidationError::RosterReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    let sheet = book.get_active_sheet();
    let (max_col, max_row) = (sheet.get_highest_column(), sheet.get_highest_row());

    Ok((1..=max_row)
        .map(|row| (1..=max_col).map(|col| sheet.get_value((col, row))).collect())
        .collect())
}
