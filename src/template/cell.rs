//! A1-style cell coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LiquidationError;

/// A single cell coordinate, 1-based in both axes.
///
/// # Example
///
/// ```
/// use liquidation_engine::template::CellRef;
///
/// let cell: CellRef = "J16".parse().unwrap();
/// assert_eq!((cell.col, cell.row), (10, 16));
/// assert_eq!(cell.offset_rows(7).to_string(), "J23");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    /// Column number (`A` = 1).
    pub col: u32,
    /// Row number.
    pub row: u32,
}

impl CellRef {
    /// Creates a coordinate from a column letter sequence and a row.
    pub fn new(column: &str, row: u32) -> Result<Self, LiquidationError> {
        format!("{}{}", column, row).parse()
    }

    /// The same column, `rows` rows further down.
    pub fn offset_rows(self, rows: u32) -> Self {
        Self {
            col: self.col,
            row: self.row + rows,
        }
    }

    /// The column letters, e.g. `AB` for column 28.
    pub fn column_letters(&self) -> String {
        let mut letters = Vec::new();
        let mut n = self.col;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + rem as u8));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl FromStr for CellRef {
    type Err = LiquidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LiquidationError::InvalidCellReference {
            reference: s.to_string(),
        };

        let trimmed = s.trim().replace('$', "");
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = trimmed.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let col = letters
            .to_ascii_uppercase()
            .bytes()
            .try_fold(0u32, |acc, b| {
                acc.checked_mul(26)?.checked_add(u32::from(b - b'A' + 1))
            })
            .ok_or_else(invalid)?;
        let row: u32 = digits.parse().map_err(|_| invalid())?;

        if row == 0 || col > 16_384 {
            return Err(invalid());
        }

        Ok(Self { col, row })
    }
}

impl TryFrom<String> for CellRef {
    type Error = LiquidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_string()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

/// A rectangular range such as a merged block `B105:G105`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner.
    pub start: CellRef,
    /// Bottom-right corner.
    pub end: CellRef,
}

impl CellRange {
    /// Returns true if `cell` lies inside the range.
    pub fn contains(&self, cell: CellRef) -> bool {
        (self.start.col..=self.end.col).contains(&cell.col)
            && (self.start.row..=self.end.row).contains(&cell.row)
    }

    /// Returns true if `cell` is the top-left anchor, the only writable cell of a merge.
    pub fn is_anchor(&self, cell: CellRef) -> bool {
        self.start == cell
    }
}

impl FromStr for CellRange {
    type Err = LiquidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = match s.split_once(':') {
            Some((a, b)) => (a.parse::<CellRef>()?, b.parse::<CellRef>()?),
            None => {
                let cell = s.parse::<CellRef>()?;
                (cell, cell)
            }
        };

        Ok(Self {
            start: CellRef {
                col: a.col.min(b.col),
                row: a.row.min(b.row),
            },
            end: CellRef {
                col: a.col.max(b.col),
                row: a.row.max(b.row),
            },
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
