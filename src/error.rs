//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// No statutory rate table exists for the requested year.
    #[error("No statutory rate table available for year {year}")]
    RateTableNotFound {
        /// The calendar year that was requested.
        year: i32,
    },

    /// An employment profile contained inconsistent data.
    #[error("Invalid employment profile field '{field}': {message}")]
    InvalidProfile {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An attendance record was invalid or contained inconsistent data.
    #[error("Invalid attendance record for {date}: {message}")]
    InvalidAttendance {
        /// The calendar date of the invalid record.
        date: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A payroll run was aborted because one employee's computation failed.
    ///
    /// The caller must discard any payslips produced before the failure;
    /// partial runs are never committed.
    #[error("Payroll run aborted at employee '{employee_id}': {message}")]
    RunAborted {
        /// The employee whose computation failed.
        employee_id: String,
        /// The underlying failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
