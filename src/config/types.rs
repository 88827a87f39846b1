//! Configuration types for the liquidation run.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a configuration directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

use crate::calculation::DEFAULT_EXTRAORDINARY_BONUS_RATE;
use crate::models::{PeriodBasis, Remuneration};
use crate::template::CellRef;

/// Roster column names.
///
/// Defaults match the payroll export the roster is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterColumns {
    /// Worker code column.
    pub code: String,
    /// Full name column.
    pub name: String,
    /// Position column.
    pub position: String,
    /// Hire date column.
    pub hire_date: String,
    /// Termination date column.
    pub termination_date: String,
    /// Monthly base salary column.
    pub base_salary: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            code: "Cod. Trab.".to_string(),
            name: "Apellidos y Nombres".to_string(),
            position: "Cargo".to_string(),
            hire_date: "Fec. Ing.".to_string(),
            termination_date: "Fecha Cese".to_string(),
            base_salary: "Basico".to_string(),
        }
    }
}

impl RosterColumns {
    /// All column names, in roster field order.
    pub fn all(&self) -> [&str; 6] {
        [
            &self.code,
            &self.name,
            &self.position,
            &self.hire_date,
            &self.termination_date,
            &self.base_salary,
        ]
    }
}

fn default_header_rows() -> usize {
    3
}

fn default_cts_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 31).unwrap_or_default()
}

fn default_gratificacion_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default()
}

fn default_termination_reason() -> String {
    "EXTINCIÓN O LIQUIDACIÓN DEL EMPLEADOR".to_string()
}

/// Run configuration from `run.yaml`.
///
/// Relative paths are resolved against the configuration directory by
/// [`ConfigLoader`](super::ConfigLoader).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// The roster workbook.
    pub roster: PathBuf,
    /// The liquidation template workbook.
    pub template: PathBuf,
    /// Where the per-worker workbooks are written.
    pub output_dir: PathBuf,
    /// Rows above the column header row.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    /// Roster column names.
    #[serde(default)]
    pub columns: RosterColumns,
    /// CTS cutoff for workers without a termination date.
    #[serde(default = "default_cts_cutoff")]
    pub cts_cutoff: NaiveDate,
    /// Gratificación cutoff for workers without a termination date.
    #[serde(default = "default_gratificacion_cutoff")]
    pub gratificacion_cutoff: NaiveDate,
    /// Date interest runs up to. Today when absent.
    #[serde(default)]
    pub settlement_date: Option<NaiveDate>,
    /// Text written as the reason the employment ended.
    #[serde(default = "default_termination_reason")]
    pub termination_reason: String,
}

impl RunConfig {
    /// Creates a run configuration with default columns, cutoffs and reason.
    pub fn new(
        roster: impl Into<PathBuf>,
        template: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            roster: roster.into(),
            template: template.into(),
            output_dir: output_dir.into(),
            header_rows: default_header_rows(),
            columns: RosterColumns::default(),
            cts_cutoff: default_cts_cutoff(),
            gratificacion_cutoff: default_gratificacion_cutoff(),
            settlement_date: None,
            termination_reason: default_termination_reason(),
        }
    }
}

/// Remuneration configuration from `remuneration.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemunerationConfig {
    /// Fixed salary of the legacy header block.
    pub legacy_salary: Decimal,
    /// Bonus of the legacy header block.
    pub legacy_bonus: Decimal,
    /// Bonus reference added to the roster salary in the current block.
    pub reference_bonus: Decimal,
    /// Which remuneration drives the period amounts.
    pub period_basis: PeriodBasis,
    /// Ley 29351 extraordinary bonus rate.
    pub extraordinary_bonus_rate: Decimal,
}

impl Default for RemunerationConfig {
    fn default() -> Self {
        Self {
            legacy_salary: Decimal::from(1100),
            legacy_bonus: Decimal::from(550),
            reference_bonus: Decimal::from(520),
            period_basis: PeriodBasis::Legacy,
            extraordinary_bonus_rate: DEFAULT_EXTRAORDINARY_BONUS_RATE,
        }
    }
}

impl RemunerationConfig {
    /// The legacy remuneration.
    pub fn legacy_pay(&self) -> Remuneration {
        Remuneration::new(self.legacy_salary, self.legacy_bonus)
    }

    /// The current remuneration for a roster salary.
    pub fn current_pay(&self, base_salary: Decimal) -> Remuneration {
        Remuneration::new(base_salary, self.reference_bonus)
    }
}

/// Font applied to every written cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontSpec {
    /// Font family.
    pub name: String,
    /// Size in points.
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: "Arial Narrow".to_string(),
            size: 8.0,
        }
    }
}

/// Cells of one header block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeaderLayout {
    /// Worker name.
    pub name: CellRef,
    /// Document number line.
    pub document: CellRef,
    /// Position.
    pub position: CellRef,
    /// Hire date.
    pub hire_date: CellRef,
    /// Termination date.
    pub termination_date: CellRef,
    /// Reason the employment ended.
    pub termination_reason: CellRef,
    /// "del … al …" service period line.
    pub service_period: CellRef,
    /// Monthly salary.
    pub salary: CellRef,
    /// Bonus reference.
    pub bonus: CellRef,
    /// One sixth of the bonus.
    pub bonus_sixth: CellRef,
    /// Computable remuneration.
    pub computable: CellRef,
    /// Optional second copy of the computable.
    #[serde(default)]
    pub computable_summary: Option<CellRef>,
}

impl HeaderLayout {
    fn at(first_row: u32, salary_row: u32, sixth_row: u32, summary: Option<CellRef>) -> Self {
        let j = |row| CellRef { col: 10, row };
        let k = |row| CellRef { col: 11, row };
        Self {
            name: j(first_row),
            document: j(first_row + 1),
            position: j(first_row + 2),
            hire_date: j(first_row + 3),
            termination_date: j(first_row + 4),
            termination_reason: j(first_row + 5),
            service_period: j(first_row + 6),
            salary: k(salary_row),
            bonus: k(salary_row + 1),
            bonus_sixth: CellRef { col: 16, row: sixth_row },
            computable: k(salary_row + 2),
            computable_summary: summary,
        }
    }

    /// The roster-salary block at J16:K25.
    pub fn current_default() -> Self {
        Self::at(16, 23, 24, None)
    }

    /// The legacy block at J93:K102.
    pub fn legacy_default() -> Self {
        Self::at(93, 100, 101, Some(CellRef { col: 11, row: 95 }))
    }
}

/// Placement of a repeated per-period block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BlockLayout {
    /// Row of the first period.
    pub first_row: u32,
    /// Rows between consecutive periods.
    pub row_stride: u32,
}

impl BlockLayout {
    /// The first row of the period at `index`.
    pub fn row_for(&self, index: usize) -> u32 {
        self.first_row + self.row_stride * index as u32
    }
}

/// Template layout from `layout.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Font for written cells.
    pub font: FontSpec,
    /// Roster-salary header block.
    pub current_header: HeaderLayout,
    /// Legacy header block.
    pub legacy_header: HeaderLayout,
    /// CTS period blocks.
    pub cts: BlockLayout,
    /// Gratificación period blocks.
    pub gratificacion: BlockLayout,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            current_header: HeaderLayout::current_default(),
            legacy_header: HeaderLayout::legacy_default(),
            cts: BlockLayout {
                first_row: 105,
                row_stride: 7,
            },
            gratificacion: BlockLayout {
                first_row: 183,
                row_stride: 11,
            },
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    run: RunConfig,
    remuneration: RemunerationConfig,
    layout: LayoutConfig,
}

impl EngineConfig {
    /// Creates a new configuration from its three parts.
    pub fn new(run: RunConfig, remuneration: RemunerationConfig, layout: LayoutConfig) -> Self {
        Self {
            run,
            remuneration,
            layout,
        }
    }

    /// Returns the run configuration.
    pub fn run(&self) -> &RunConfig {
        &self.run
    }

    /// Returns the remuneration configuration.
    pub fn remuneration(&self) -> &RemunerationConfig {
        &self.remuneration
    }

    /// Returns the template layout.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Overrides the settlement date of `run.yaml`.
    pub fn with_settlement_date(mut self, date: NaiveDate) -> Self {
        self.run.settlement_date = Some(date);
        self
    }
}
