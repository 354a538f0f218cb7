//! Event-driven simulation engine.
//!
//! [`SchedulerEngine`] consumes the event stream — job arrivals,
//! completions, and quantum expiries — and keeps the ready queue, core
//! table, and completed-job ledger consistent under the configured
//! policy. [`TimingSummary`] condenses the ledger into the classic
//! wait / turnaround / response averages.

mod scheduler;
mod stats;

pub use scheduler::SchedulerEngine;
pub use stats::TimingSummary;
