//! Error types and notification signals for the Biblion client core
//!
//! Every failure mode listed in the design is expected and recoverable:
//! operations return them as explicit values, never as panics. Transient
//! fetch failures are absorbed inside the paging layer and surfaced to the
//! shell as [`Signal`]s; only contract violations (e.g. selecting a
//! subregion in a hierarchy that has none) are debug-asserted.

use serde::Serialize;
use thiserror::Error;

/// Stable signal codes exposed to the UI shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum SignalCode {
    Success = 0,
    Failure = 1,
    FetchFailure = 2,
    NoSuchSelection = 3,
    InvalidAncestor = 4,
    CapacityExceeded = 5,
    QuantityClampedToZero = 6,
    NothingSelected = 7,
}

/// Severity of a notification shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Main error type for core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("nothing selected")]
    NothingSelected,

    #[error("capacity exceeded: {requested} requested over cap {cap}")]
    CapacityExceeded { requested: u32, cap: u32 },

    #[error("invalid ancestor selection: {0}")]
    InvalidAncestor(String),

    #[error("no selected book with id {0}")]
    NoSuchSelection(i64),
}

impl CoreError {
    /// Map to the stable code reported to the shell
    pub fn code(&self) -> SignalCode {
        match self {
            CoreError::NothingSelected => SignalCode::NothingSelected,
            CoreError::CapacityExceeded { .. } => SignalCode::CapacityExceeded,
            CoreError::InvalidAncestor(_) => SignalCode::InvalidAncestor,
            CoreError::NoSuchSelection(_) => SignalCode::NoSuchSelection,
        }
    }
}

/// Structured notification payload delivered through the notification port.
///
/// The core never renders UI; it emits one of these and the shell decides
/// how to present it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Signal {
    /// A list fetch failed; the affected cache kept its items and stopped
    /// paginating.
    FetchFailed { context: String, message: String },
    /// A quantity change would have pushed the composition over its cap and
    /// was clamped or rejected.
    CapacityExceeded { cap: u32 },
    /// A book was kept visible in the selection but its requested quantity
    /// was forced to zero.
    QuantityClampedToZero { book_id: i64 },
}

impl Signal {
    pub fn code(&self) -> SignalCode {
        match self {
            Signal::FetchFailed { .. } => SignalCode::FetchFailure,
            Signal::CapacityExceeded { .. } => SignalCode::CapacityExceeded,
            Signal::QuantityClampedToZero { .. } => SignalCode::QuantityClampedToZero,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Signal::FetchFailed { .. } => Severity::Error,
            Signal::CapacityExceeded { .. } => Severity::Warning,
            Signal::QuantityClampedToZero { .. } => Severity::Warning,
        }
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
