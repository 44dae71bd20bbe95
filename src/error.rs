//! Unified error handling for epiforge
//!
//! The transform itself has no error channel: numeric degeneracies (zero
//! sigma, saturated exponentials) propagate through the output as ordinary
//! floating-point values. Errors exist only on the host-side surfaces that
//! assemble and validate parameter tables and block shapes, and those are
//! consolidated here with categorization for handling decisions.

use std::fmt;

// Re-export thiserror for convenience
pub use thiserror;

/// Unified error type for epiforge
#[derive(Debug, thiserror::Error)]
pub enum EpiForgeError {
    // ========== Parameter Table Errors ==========
    /// The amplitude/mean/std-dev columns have different lengths
    #[error(
        "parameter column length mismatch: amplitude={amplitude}, mean={mean}, std_dev={std_dev}"
    )]
    ParameterColumnMismatch {
        amplitude: usize,
        mean: usize,
        std_dev: usize,
    },

    /// A parameter table with zero entries was supplied
    #[error("parameter table is empty")]
    EmptyParameterTable,

    /// The parameter table does not cover the requested lane range
    #[error("parameter table too short: {len} entries, {required} required")]
    ParameterTableTooShort { len: usize, required: usize },

    // ========== Block Shape Errors ==========
    /// Accumulator/output block dimensions are inconsistent
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Row width must be non-zero and divide the block length
    #[error("invalid row width: {0}")]
    InvalidRowWidth(usize),

    // ========== Configuration Errors ==========
    /// Invalid launch configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ========== Internal Errors ==========
    /// Internal error (indicates a bug)
    #[error("internal error: {0}")]
    InternalError(String),
}

impl EpiForgeError {
    /// Categorize the error for handling decisions
    ///
    /// Returns the error category, which can be used to determine
    /// whether an error is user-actionable, a data problem, or a bug.
    pub fn category(&self) -> ErrorCategory {
        match self {
            // User errors - actionable by users
            EpiForgeError::InvalidRowWidth(_) | EpiForgeError::InvalidConfiguration(_) => {
                ErrorCategory::User
            }

            // Data errors - malformed parameter tables or blocks
            EpiForgeError::ParameterColumnMismatch { .. }
            | EpiForgeError::EmptyParameterTable
            | EpiForgeError::ParameterTableTooShort { .. }
            | EpiForgeError::ShapeMismatch(_) => ErrorCategory::Data,

            // Internal errors - bugs
            EpiForgeError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// Check if this is a user-facing error (actionable by users)
    pub fn is_user_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::User)
    }

    /// Check if this is an internal error (indicates a bug)
    pub fn is_internal_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Internal)
    }
}

/// Error category for handling decisions
///
/// - User: invalid request, fix the call site
/// - Data: inconsistent parameter tables or block shapes
/// - Internal: report as a bug
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User error - invalid input or configuration
    User,
    /// Data error - inconsistent tables or shapes
    Data,
    /// Internal error - indicates a bug
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::User => write!(f, "User"),
            ErrorCategory::Data => write!(f, "Data"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

/// Helper type alias for Results using EpiForgeError
pub type ForgeResult<T> = std::result::Result<T, EpiForgeError>;

/// Create a user-facing error with context
///
/// # Examples
/// ```ignore
/// return Err(user_error!("row width {} exceeds tile size", width));
/// ```
#[macro_export]
macro_rules! user_error {
    ($msg:expr) => {
        $crate::error::EpiForgeError::InvalidConfiguration($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::EpiForgeError::InvalidConfiguration(format!($fmt, $($arg)*))
    };
}

/// Create an internal error with context
///
/// # Examples
/// ```ignore
/// return Err(internal_error!("lane index wrapped"));
/// ```
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::EpiForgeError::InternalError($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::EpiForgeError::InternalError(format!($fmt, $($arg)*))
    };
}
