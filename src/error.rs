//! Error types for the Payroll Engine.
//!
//! The payroll calculator itself never fails; these errors cover configuration
//! loading, calendar arithmetic and validation of incoming requests.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
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

    /// Configuration parsed but holds a value the engine cannot work with.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A month number outside 1..=12.
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth {
        /// The year requested.
        year: i32,
        /// The month requested.
        month: u32,
    },

    /// The requested weekday ordinal does not exist in the month.
    #[error("Month {year}-{month:02} has no weekday number {n}")]
    WeekdayOutOfRange {
        /// The requested ordinal (1-based).
        n: u32,
        /// The year requested.
        year: i32,
        /// The month requested.
        month: u32,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An absence record was invalid.
    #[error("Invalid absence '{absence_id}': {message}")]
    InvalidAbsence {
        /// The ID of the invalid absence.
        absence_id: String,
        /// A description of what made the absence invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
