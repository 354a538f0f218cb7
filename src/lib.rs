//! Multi-core CPU scheduling simulation.
//!
//! Replays a driver-supplied stream of job events against simulated
//! cores under one of six classic disciplines — FCFS, Round-Robin,
//! SJF and its preemptive variant, and priority scheduling with and
//! without preemption — and reports per-job and aggregate timing
//! statistics. The driver owns the clock; the engine only reacts to
//! the events it is handed.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `CoreTable`, lifecycle state
//! - **`queue`**: `OrderedQueue`, a comparator-ordered ready queue
//! - **`policy`**: `SchedulingPolicy` — queue order and preemption rules
//! - **`engine`**: `SchedulerEngine` event loop and `TimingSummary`
//! - **`error`**: `SchedulerError` and result alias
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8
//! - Conway, Maxwell, Miller (1967), "Theory of Scheduling"

pub mod engine;
pub mod error;
pub mod models;
pub mod policy;
pub mod queue;
