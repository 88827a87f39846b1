//! Error types for the liquidation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a run or a single worker.

use thiserror::Error;

/// The main error type for the liquidation engine.
///
/// Recoverable per-field problems never reach this type: they are replaced by
/// sentinels and logged. Everything here is either fatal for the run or
/// reported per worker by the batch runner.
///
/// # Example
///
/// ```
/// use liquidation_engine::error::LiquidationError;
///
/// let error = LiquidationError::MissingColumn {
///     column: "Fec. Ing.".to_string(),
/// };
/// assert_eq!(error.to_string(), "Roster column not found: Fec. Ing.");
/// ```
#[derive(Debug, Error)]
pub enum LiquidationError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The worker roster workbook does not exist.
    #[error("Roster file not found: {path}")]
    RosterNotFound {
        /// The roster path.
        path: String,
    },

    /// The roster workbook exists but could not be read.
    #[error("Failed to read roster '{path}': {message}")]
    RosterReadError {
        /// The roster path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An expected roster column is absent from the header row.
    #[error("Roster column not found: {column}")]
    MissingColumn {
        /// The column header that was expected.
        column: String,
    },

    /// The liquidation template does not exist.
    #[error("Template file not found: {path}")]
    TemplateNotFound {
        /// The template path.
        path: String,
    },

    /// A workbook could not be opened or saved.
    #[error("Workbook error for '{path}': {message}")]
    WorkbookError {
        /// The workbook path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The output directory could not be created.
    #[error("Cannot prepare output directory '{path}': {message}")]
    OutputDirectory {
        /// The directory path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A cell reference such as `AE105` could not be parsed.
    #[error("Invalid cell reference: {reference}")]
    InvalidCellReference {
        /// The offending reference.
        reference: String,
    },

    /// A date string could not be parsed.
    #[error("Invalid date '{value}': {message}")]
    InvalidDate {
        /// The offending input.
        value: String,
        /// A description of the parse error.
        message: String,
    },

    /// A semester calendar was built from an impossible anchor.
    #[error("Invalid semester calendar: {message}")]
    InvalidCalendar {
        /// A description of the problem.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return LiquidationError.
pub type LiquidationResult<T> = Result<T, LiquidationError>;
