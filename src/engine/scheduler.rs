//! The scheduling engine.
//!
//! Replays an externally driven sequence of arrival, completion, and
//! quantum events against a fixed set of cores, dispatching jobs under
//! the configured discipline and recording per-job timing statistics.
//!
//! # Event model
//!
//! The driver owns the clock: every operation takes the current simulated
//! time, delivered in non-decreasing order with distinct arrival times.
//! The engine never advances time itself and never completes a job on its
//! own — completion arrives as an explicit event.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use std::collections::HashSet;

use log::{debug, trace};

use crate::error::{SchedulerError, SchedulerErrorKind, SchedulerResult};
use crate::models::{CoreId, CoreTable, Job, JobId, JobState, Time};
use crate::policy::SchedulingPolicy;
use crate::queue::OrderedQueue;

use super::stats::TimingSummary;

/// A multi-core scheduling simulation engine.
///
/// Holds the ready queue, the core table, and the finished-job ledger.
/// Jobs move between the three by value, so every job has exactly one
/// home at any instant.
///
/// # Example
///
/// ```
/// use sched_sim::engine::SchedulerEngine;
/// use sched_sim::policy::SchedulingPolicy;
///
/// let mut engine = SchedulerEngine::start_up(1, SchedulingPolicy::Fcfs).unwrap();
/// assert_eq!(engine.new_job(0, 0, 5, 1).unwrap(), Some(0)); // dispatched on core 0
/// assert_eq!(engine.new_job(1, 1, 1, 1).unwrap(), None);    // queued behind job 0
/// assert_eq!(engine.job_finished(0, 0, 5).unwrap(), Some(1));
/// assert_eq!(engine.job_finished(0, 1, 6).unwrap(), None);
/// assert!((engine.average_wait_time().unwrap() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct SchedulerEngine {
    policy: SchedulingPolicy,
    cores: CoreTable,
    waiting: OrderedQueue<Job>,
    completed: Vec<Job>,
    seen_ids: HashSet<JobId>,
}

impl SchedulerEngine {
    /// Creates an engine with `core_count` idle cores under `policy`.
    ///
    /// # Errors
    /// `InvalidCoreCount` if `core_count` is zero.
    pub fn start_up(core_count: usize, policy: SchedulingPolicy) -> SchedulerResult<Self> {
        if core_count == 0 {
            return Err(SchedulerError::new(
                SchedulerErrorKind::InvalidCoreCount,
                "Engine requires at least one core",
            ));
        }

        debug!("engine start: policy={policy}, cores={core_count}");

        Ok(Self {
            policy,
            cores: CoreTable::new(core_count),
            waiting: OrderedQueue::new(policy.comparator()),
            completed: Vec::new(),
            seen_ids: HashSet::new(),
        })
    }

    /// Admits a newly arrived job.
    ///
    /// The job is dispatched immediately when a core is idle (lowest index
    /// first) or, under a preemptive policy, when it strictly dominates
    /// the weakest running job — which is then returned to the ready queue
    /// with its remaining service recomputed. Otherwise the job queues in
    /// policy order.
    ///
    /// Returns the core the job starts on, or `None` if it queued.
    ///
    /// # Errors
    /// `InvalidServiceTime` when `service_time` is zero, `DuplicateJobId`
    /// when `job_id` was admitted before.
    pub fn new_job(
        &mut self,
        job_id: JobId,
        time: Time,
        service_time: Time,
        priority: i32,
    ) -> SchedulerResult<Option<CoreId>> {
        if service_time == 0 {
            return Err(SchedulerError::new(
                SchedulerErrorKind::InvalidServiceTime,
                format!("Job {job_id} arrived with zero service time"),
            ));
        }
        if !self.seen_ids.insert(job_id) {
            return Err(SchedulerError::new(
                SchedulerErrorKind::DuplicateJobId,
                format!("Job id {job_id} already admitted"),
            ));
        }

        let mut job = Job::new(job_id, time, service_time, priority);

        if let Some(core) = self.cores.lowest_idle() {
            job.mark_dispatched(core, time);
            self.cores.assign(core, job);
            debug!("job {job_id} dispatched on idle core {core} at t={time}");
            self.debug_assert_consistent();
            return Ok(Some(core));
        }

        if self.policy.is_preemptive() {
            if let Some(core) = self.try_preempt(&job, time) {
                job.mark_dispatched(core, time);
                self.cores.assign(core, job);
                debug!("job {job_id} dispatched on core {core} at t={time} after eviction");
                self.debug_assert_consistent();
                return Ok(Some(core));
            }
        }

        let position = self.waiting.insert(job);
        trace!(
            "job {job_id} queued at position {position} at t={time}; jobs: {}",
            self.format_jobs()
        );
        self.debug_assert_consistent();
        Ok(None)
    }

    /// Records the completion of the job running on `core_id`.
    ///
    /// The finished job moves to the completed ledger with its statistics
    /// final. If the ready queue is non-empty, its front job takes the
    /// freed core and its id is returned; otherwise the core goes idle.
    ///
    /// # Errors
    /// `CoreOutOfRange`, `CoreIdle`, or `JobMismatch` when the event does
    /// not match the engine's state. A rejected event leaves the engine
    /// unchanged.
    pub fn job_finished(
        &mut self,
        core_id: CoreId,
        job_id: JobId,
        time: Time,
    ) -> SchedulerResult<Option<JobId>> {
        if core_id >= self.cores.core_count() {
            return Err(SchedulerError::new(
                SchedulerErrorKind::CoreOutOfRange,
                format!(
                    "Core {core_id} out of range ({} cores)",
                    self.cores.core_count()
                ),
            ));
        }

        let mut finished = match self.cores.release(core_id) {
            Some(job) => job,
            None => {
                return Err(SchedulerError::new(
                    SchedulerErrorKind::CoreIdle,
                    format!("Core {core_id} has no running job"),
                ));
            }
        };
        if finished.id != job_id {
            let occupant = finished.id;
            self.cores.assign(core_id, finished);
            return Err(SchedulerError::new(
                SchedulerErrorKind::JobMismatch,
                format!("Core {core_id} is running job {occupant}, not job {job_id}"),
            ));
        }

        finished.mark_completed(time);
        debug!(
            "job {job_id} finished on core {core_id} at t={time} (turnaround={}, wait={})",
            finished.turnaround_time().unwrap_or(0),
            finished.wait_time().unwrap_or(0)
        );
        self.completed.push(finished);

        let next = self.dispatch_front(core_id, time);
        self.debug_assert_consistent();
        Ok(next)
    }

    /// Rotates the job on `core_id` at the end of its time slice.
    ///
    /// The occupant, if any, re-enters the ready queue at the back with
    /// its remaining service reduced by the elapsed slice; the front of
    /// the queue then takes the core — a sole job comes straight back.
    /// With an idle core and an empty queue the core stays idle.
    ///
    /// # Errors
    /// `PolicyMismatch` under a non-time-sliced policy, `CoreOutOfRange`
    /// for a bad core index.
    pub fn quantum_expired(
        &mut self,
        core_id: CoreId,
        time: Time,
    ) -> SchedulerResult<Option<JobId>> {
        if !self.policy.is_time_sliced() {
            return Err(SchedulerError::new(
                SchedulerErrorKind::PolicyMismatch,
                format!("Quantum events do not apply to {}", self.policy),
            ));
        }
        if core_id >= self.cores.core_count() {
            return Err(SchedulerError::new(
                SchedulerErrorKind::CoreOutOfRange,
                format!(
                    "Core {core_id} out of range ({} cores)",
                    self.cores.core_count()
                ),
            ));
        }

        if let Some(mut rotated) = self.cores.release(core_id) {
            rotated.mark_preempted(time);
            trace!(
                "job {} rotated off core {core_id} at t={time} (remaining={})",
                rotated.id,
                rotated.remaining_time
            );
            self.waiting.insert(rotated);
        }

        let next = self.dispatch_front(core_id, time);
        self.debug_assert_consistent();
        Ok(next)
    }

    /// Mean time completed jobs spent waiting (turnaround minus service).
    ///
    /// # Errors
    /// `NoCompletedJobs` until at least one job has finished.
    pub fn average_wait_time(&self) -> SchedulerResult<f64> {
        self.summary().map(|s| s.average_wait_time)
    }

    /// Mean time from arrival to completion over completed jobs.
    ///
    /// # Errors
    /// `NoCompletedJobs` until at least one job has finished.
    pub fn average_turnaround_time(&self) -> SchedulerResult<f64> {
        self.summary().map(|s| s.average_turnaround_time)
    }

    /// Mean time from arrival to first dispatch over completed jobs.
    ///
    /// # Errors
    /// `NoCompletedJobs` until at least one job has finished.
    pub fn average_response_time(&self) -> SchedulerResult<f64> {
        self.summary().map(|s| s.average_response_time)
    }

    /// Full timing report over the completed ledger.
    ///
    /// # Errors
    /// `NoCompletedJobs` until at least one job has finished.
    pub fn summary(&self) -> SchedulerResult<TimingSummary> {
        TimingSummary::from_jobs(&self.completed).ok_or_else(|| {
            SchedulerError::new(SchedulerErrorKind::NoCompletedJobs, "No job has completed")
        })
    }

    /// The configured discipline.
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Number of cores.
    pub fn core_count(&self) -> usize {
        self.cores.core_count()
    }

    /// IDs of queued jobs, front to back.
    pub fn waiting_jobs(&self) -> Vec<JobId> {
        self.waiting.iter().map(|job| job.id).collect()
    }

    /// Number of queued jobs.
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Jobs currently on cores, as `(core, job id)` pairs.
    pub fn running_jobs(&self) -> Vec<(CoreId, JobId)> {
        self.cores.running().map(|(core, job)| (core, job.id)).collect()
    }

    /// Finished jobs with their final statistics, in completion order.
    pub fn completed_jobs(&self) -> &[Job] {
        &self.completed
    }

    /// Tears the engine down, logging final counters.
    ///
    /// Taking the engine by value makes a second shutdown, or any use
    /// after it, a compile error.
    pub fn shutdown(self) {
        debug!(
            "engine shutdown: policy={}, completed={}, waiting={}, running={}",
            self.policy,
            self.completed.len(),
            self.waiting.len(),
            self.cores.running().count()
        );
    }

    /// Picks and evicts the weakest incumbent if `newcomer` strictly
    /// dominates it; returns the freed core.
    ///
    /// Every running job's remaining service is recomputed first, so both
    /// the comparison and the evicted job's queue position reflect the
    /// work actually done up to `time`. Only the single weakest incumbent
    /// is considered.
    fn try_preempt(&mut self, newcomer: &Job, time: Time) -> Option<CoreId> {
        for (_, running) in self.cores.running_mut() {
            running.refresh_remaining(time);
        }

        let policy = self.policy;
        let mut weakest: Option<(CoreId, &Job)> = None;
        for (core, job) in self.cores.running() {
            let replace = match weakest {
                Some((_, current)) => policy.more_evictable(job, current),
                None => true,
            };
            if replace {
                weakest = Some((core, job));
            }
        }

        let (victim_core, incumbent) = weakest?;
        if !policy.preempts(newcomer, incumbent) {
            return None;
        }

        let mut victim = self.cores.release(victim_core)?;
        victim.mark_preempted(time);
        debug!(
            "job {} evicted from core {victim_core} by job {} at t={time} (remaining={})",
            victim.id, newcomer.id, victim.remaining_time
        );
        self.waiting.insert(victim);
        Some(victim_core)
    }

    /// Dispatches the ready-queue front onto `core`, if anything waits.
    fn dispatch_front(&mut self, core: CoreId, time: Time) -> Option<JobId> {
        let mut job = self.waiting.poll()?;
        job.mark_dispatched(core, time);
        let id = job.id;
        self.cores.assign(core, job);
        debug!("job {id} dispatched on core {core} at t={time}");
        Some(id)
    }

    /// All live jobs for trace logging: running jobs as `id(core)` in
    /// core order, then queued jobs as `id(-1)` front to back.
    fn format_jobs(&self) -> String {
        let mut parts: Vec<String> = self
            .cores
            .running()
            .map(|(core, job)| format!("{}({core})", job.id))
            .collect();
        parts.extend(self.waiting.iter().map(|job| format!("{}(-1)", job.id)));
        parts.join(" ")
    }

    /// Cross-checks container states in debug builds.
    fn debug_assert_consistent(&self) {
        if cfg!(debug_assertions) {
            for job in self.waiting.iter() {
                debug_assert_eq!(
                    job.state,
                    JobState::Waiting,
                    "queued job {} is {:?}",
                    job.id,
                    job.state
                );
                debug_assert!(job.core.is_none(), "queued job {} bound to a core", job.id);
            }
            for (core, job) in self.cores.running() {
                debug_assert_eq!(
                    job.state,
                    JobState::Running,
                    "job {} on core {core} is {:?}",
                    job.id,
                    job.state
                );
                debug_assert_eq!(
                    job.core,
                    Some(core),
                    "job {} core binding mismatch",
                    job.id
                );
            }
            for job in &self.completed {
                debug_assert!(job.is_completed(), "ledger job {} not completed", job.id);
                debug_assert_eq!(job.remaining_time, 0, "ledger job {} has remaining work", job.id);
            }
        }
    }
}
