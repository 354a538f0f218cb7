//! Aggregate timing report.
//!
//! Computes the classical trace averages from the finished-job ledger.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Wait | turnaround − service demand |
//! | Turnaround | completion − arrival |
//! | Response | first dispatch − arrival |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::models::Job;

/// Aggregate timing statistics over completed jobs.
///
/// All averages are arithmetic means in simulator time units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Number of jobs the averages cover.
    pub completed_jobs: usize,
    /// Mean time spent waiting (turnaround minus service).
    pub average_wait_time: f64,
    /// Mean time from arrival to completion.
    pub average_turnaround_time: f64,
    /// Mean time from arrival to first dispatch.
    pub average_response_time: f64,
}

impl TimingSummary {
    /// Computes the summary over the completed jobs in `jobs`; unfinished
    /// jobs are skipped.
    ///
    /// Returns `None` when no job has completed — an average over zero
    /// jobs has no defensible value.
    pub fn from_jobs(jobs: &[Job]) -> Option<Self> {
        let mut count: usize = 0;
        let mut wait: f64 = 0.0;
        let mut turnaround: f64 = 0.0;
        let mut response: f64 = 0.0;

        for job in jobs.iter().filter(|job| job.is_completed()) {
            count += 1;
            wait += job.wait_time().unwrap_or(0) as f64;
            turnaround += job.turnaround_time().unwrap_or(0) as f64;
            response += job.response_time().unwrap_or(0) as f64;
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            completed_jobs: count,
            average_wait_time: wait / count as f64,
            average_turnaround_time: turnaround / count as f64,
            average_response_time: response / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_completed(id: u64, arrival: u64, service: u64, dispatch: u64, finish: u64) -> Job {
        let mut job = Job::new(id, arrival, service, 0);
        job.mark_dispatched(0, dispatch);
        job.mark_completed(finish);
        job
    }

    #[test]
    fn test_summary_means() {
        let jobs = vec![
            // wait 0, turnaround 5, response 0
            make_completed(0, 0, 5, 0, 5),
            // wait 4, turnaround 5, response 4
            make_completed(1, 1, 1, 5, 6),
        ];

        let summary = TimingSummary::from_jobs(&jobs).unwrap();
        assert_eq!(summary.completed_jobs, 2);
        assert!((summary.average_wait_time - 2.0).abs() < 1e-10);
        assert!((summary.average_turnaround_time - 5.0).abs() < 1e-10);
        assert!((summary.average_response_time - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_skips_unfinished_jobs() {
        let mut still_running = Job::new(9, 0, 10, 0);
        still_running.mark_dispatched(0, 0);

        let jobs = vec![make_completed(0, 0, 4, 2, 6), still_running];

        let summary = TimingSummary::from_jobs(&jobs).unwrap();
        assert_eq!(summary.completed_jobs, 1);
        assert!((summary.average_wait_time - 2.0).abs() < 1e-10);
        assert!((summary.average_response_time - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_requires_a_completion() {
        assert_eq!(TimingSummary::from_jobs(&[]), None);

        let waiting = Job::new(0, 0, 5, 0);
        assert_eq!(TimingSummary::from_jobs(&[waiting]), None);
    }

    #[test]
    fn test_summary_serde_round_trip() {
        let summary = TimingSummary {
            completed_jobs: 3,
            average_wait_time: 2.5,
            average_turnaround_time: 7.25,
            average_response_time: 1.0,
        };

        let json = serde_json::to_string(&summary).unwrap();
        let back: TimingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
