//! Engine error reporting.
//!
//! Every fallible operation returns a `SchedulerError` carrying a
//! machine-readable kind plus a human-readable message. Precondition
//! violations fail fast instead of producing silently wrong statistics:
//! a driver bug surfaces at the offending event, not at the final report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias for engine operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// An engine error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerError {
    /// Error category.
    pub kind: SchedulerErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerErrorKind {
    /// The engine was requested with zero cores.
    InvalidCoreCount,
    /// A job arrived with a zero service demand.
    InvalidServiceTime,
    /// Two jobs share the same ID.
    DuplicateJobId,
    /// A core index outside the engine's core range.
    CoreOutOfRange,
    /// The addressed core has no running job.
    CoreIdle,
    /// The addressed core is running a different job.
    JobMismatch,
    /// A quantum event was delivered under a non-time-sliced policy.
    PolicyMismatch,
    /// A timing average was requested before any job completed.
    NoCompletedJobs,
}

impl SchedulerError {
    /// Creates an error with the given kind and message.
    pub fn new(kind: SchedulerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SchedulerError {}
