//! Job model.
//!
//! A job is the unit of work in the simulation: it arrives once, waits in
//! the ready queue, runs on a core — possibly in several slices under a
//! preemptive discipline — and completes. Timing statistics are derived
//! from the stamps recorded along the way.
//!
//! # Reference
//! Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

use serde::{Deserialize, Serialize};

/// Globally unique job identifier, assigned by the driver.
pub type JobId = u64;

/// Zero-based processor core index.
pub type CoreId = usize;

/// Simulated time, in abstract units.
pub type Time = u64;

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// In the ready queue, bound to no core.
    Waiting,
    /// Occupying a core.
    Running,
    /// Finished; statistics are final.
    Completed,
}

/// A job tracked by the scheduler.
///
/// A job lives in exactly one place at a time — the ready queue, a core
/// slot, or the finished-job ledger — and moves between them by value.
///
/// # Time Representation
/// All times are in abstract simulator units relative to t=0. The driver
/// defines the unit (cycles, ticks, ms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Time the job arrived.
    pub arrival_time: Time,
    /// Total service demand at arrival. Never changes.
    pub service_time: Time,
    /// Service demand still outstanding.
    pub remaining_time: Time,
    /// Scheduling priority (lower value = higher priority).
    pub priority: i32,
    /// Lifecycle state.
    pub state: JobState,
    /// Core currently occupied. `None` unless Running.
    pub core: Option<CoreId>,
    /// Time of the first dispatch. `None` until the job first runs.
    pub first_dispatch_time: Option<Time>,
    /// Time the job completed. `None` until Completed.
    pub completion_time: Option<Time>,
    /// Time of the latest dispatch or remaining-time refresh.
    pub dispatched_at: Option<Time>,
}

impl Job {
    /// Creates a job in the Waiting state with its full service outstanding.
    pub fn new(id: JobId, arrival_time: Time, service_time: Time, priority: i32) -> Self {
        Self {
            id,
            arrival_time,
            service_time,
            remaining_time: service_time,
            priority,
            state: JobState::Waiting,
            core: None,
            first_dispatch_time: None,
            completion_time: None,
            dispatched_at: None,
        }
    }

    /// Places the job on a core.
    ///
    /// The first dispatch is stamped once and kept across preemptions, so
    /// response time always measures the first time the job saw a core.
    pub fn mark_dispatched(&mut self, core: CoreId, now: Time) {
        debug_assert_eq!(
            self.state,
            JobState::Waiting,
            "job {} dispatched while {:?}",
            self.id,
            self.state
        );
        self.state = JobState::Running;
        self.core = Some(core);
        self.dispatched_at = Some(now);
        if self.first_dispatch_time.is_none() {
            self.first_dispatch_time = Some(now);
        }
    }

    /// Returns the job to the ready state, charging the elapsed run time
    /// against its remaining service.
    ///
    /// A job evicted in the same instant it was first dispatched never
    /// actually ran; its response clock restarts.
    pub fn mark_preempted(&mut self, now: Time) {
        debug_assert_eq!(
            self.state,
            JobState::Running,
            "job {} preempted while {:?}",
            self.id,
            self.state
        );
        self.refresh_remaining(now);
        self.state = JobState::Waiting;
        self.core = None;
        self.dispatched_at = None;
        if self.first_dispatch_time == Some(now) {
            self.first_dispatch_time = None;
        }
    }

    /// Finalizes the job. Statistics are readable afterwards.
    pub fn mark_completed(&mut self, now: Time) {
        debug_assert_eq!(
            self.state,
            JobState::Running,
            "job {} completed while {:?}",
            self.id,
            self.state
        );
        self.state = JobState::Completed;
        self.core = None;
        self.remaining_time = 0;
        self.completion_time = Some(now);
        self.dispatched_at = None;
    }

    /// Reduces the outstanding service by the time run since the latest
    /// dispatch or refresh point. No-op while the job is off-core.
    pub fn refresh_remaining(&mut self, now: Time) {
        if let Some(since) = self.dispatched_at {
            let ran = now.saturating_sub(since);
            self.remaining_time = self.remaining_time.saturating_sub(ran);
            self.dispatched_at = Some(now);
        }
    }

    /// Time from arrival to first dispatch. `None` until first dispatched.
    pub fn response_time(&self) -> Option<Time> {
        self.first_dispatch_time
            .map(|t| t.saturating_sub(self.arrival_time))
    }

    /// Time from arrival to completion. `None` until Completed.
    pub fn turnaround_time(&self) -> Option<Time> {
        self.completion_time
            .map(|t| t.saturating_sub(self.arrival_time))
    }

    /// Turnaround minus the original service demand. `None` until Completed.
    pub fn wait_time(&self) -> Option<Time> {
        self.turnaround_time()
            .map(|tat| tat.saturating_sub(self.service_time))
    }

    /// Whether the job has finished.
    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_initial_state() {
        let job = Job::new(3, 10, 5, 2);
        assert_eq!(job.id, 3);
        assert_eq!(job.arrival_time, 10);
        assert_eq!(job.service_time, 5);
        assert_eq!(job.remaining_time, 5);
        assert_eq!(job.priority, 2);
        assert_eq!(job.state, JobState::Waiting);
        assert_eq!(job.core, None);
        assert_eq!(job.response_time(), None);
        assert_eq!(job.turnaround_time(), None);
        assert_eq!(job.wait_time(), None);
    }

    #[test]
    fn test_dispatch_and_complete_metrics() {
        let mut job = Job::new(0, 0, 5, 0);
        job.mark_dispatched(1, 2);
        assert_eq!(job.state, JobState::Running);
        assert_eq!(job.core, Some(1));
        assert_eq!(job.response_time(), Some(2));

        job.mark_completed(7);
        assert!(job.is_completed());
        assert_eq!(job.core, None);
        assert_eq!(job.remaining_time, 0);
        assert_eq!(job.turnaround_time(), Some(7));
        assert_eq!(job.wait_time(), Some(2)); // 7 - 5
        assert_eq!(job.response_time(), Some(2));
    }

    #[test]
    fn test_preemption_charges_elapsed_run_time() {
        let mut job = Job::new(0, 0, 10, 0);
        job.mark_dispatched(0, 0);
        job.mark_preempted(2);

        assert_eq!(job.state, JobState::Waiting);
        assert_eq!(job.core, None);
        assert_eq!(job.remaining_time, 8);
        // Ran from t=0, so the response clock stays at its first dispatch.
        assert_eq!(job.first_dispatch_time, Some(0));
    }

    #[test]
    fn test_preemption_at_dispatch_instant_restarts_response() {
        let mut job = Job::new(0, 3, 10, 0);
        job.mark_dispatched(0, 5);
        job.mark_preempted(5);

        assert_eq!(job.remaining_time, 10);
        assert_eq!(job.first_dispatch_time, None);
        assert_eq!(job.response_time(), None);

        // Re-dispatched later: response measures the dispatch that ran.
        job.mark_dispatched(0, 9);
        assert_eq!(job.response_time(), Some(6));
    }

    #[test]
    fn test_refresh_remaining_is_incremental() {
        let mut job = Job::new(0, 0, 10, 0);
        job.mark_dispatched(0, 0);

        job.refresh_remaining(3);
        assert_eq!(job.remaining_time, 7);

        // Refreshing again charges only the time since the last refresh.
        job.refresh_remaining(5);
        assert_eq!(job.remaining_time, 5);
    }

    #[test]
    fn test_refresh_remaining_off_core_is_noop() {
        let mut job = Job::new(0, 0, 10, 0);
        job.refresh_remaining(4);
        assert_eq!(job.remaining_time, 10);
    }

    #[test]
    fn test_remaining_survives_redispatch() {
        let mut job = Job::new(0, 0, 10, 0);
        job.mark_dispatched(0, 0);
        job.mark_preempted(2);
        assert_eq!(job.remaining_time, 8);

        job.mark_dispatched(0, 5);
        assert_eq!(job.remaining_time, 8);

        // Waiting time between t=2 and t=5 is never charged.
        job.refresh_remaining(6);
        assert_eq!(job.remaining_time, 7);
    }
}
