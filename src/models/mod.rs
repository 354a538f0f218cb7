//! Simulation domain models.
//!
//! Core data types for the scheduling simulation: the job being scheduled
//! and the table of processor cores it runs on. A job is owned by exactly
//! one container at any point in its life.
//!
//! # Lifecycle
//!
//! | State | Where the job lives |
//! |-----------|---------------------|
//! | Waiting | the ready queue |
//! | Running | a `CoreTable` slot |
//! | Completed | the engine's finished-job ledger |

mod core_table;
mod job;

pub use core_table::CoreTable;
pub use job::{CoreId, Job, JobId, JobState, Time};
