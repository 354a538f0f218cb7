//! Scheduling disciplines.
//!
//! The six classical single-queue disciplines, selected once at engine
//! start-up. Each policy contributes two things: the comparator ordering
//! the ready queue, and — for the preemptive members — the predicates
//! that pick and evict a running job.
//!
//! # Disciplines
//!
//! | Policy | Queue order | Preemption |
//! |--------|-------------|------------|
//! | `Fcfs` | arrival (FIFO) | none |
//! | `RoundRobin` | FIFO, re-queues at the back | quantum expiry |
//! | `Sjf` | remaining service | none |
//! | `PreemptiveSjf` | remaining service | shorter arrival evicts longest remaining |
//! | `Priority` | priority, tie → earlier arrival | none |
//! | `PreemptivePriority` | priority, tie → earlier arrival | higher priority evicts lowest |
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Conway, Maxwell & Miller (1967), "Theory of Scheduling"

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::models::Job;
use crate::queue::Comparator;

/// A CPU scheduling discipline.
///
/// Lower `priority` values mean higher priority throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingPolicy {
    /// First-Come First-Served.
    Fcfs,
    /// FCFS order with forced rotation on quantum expiry.
    RoundRobin,
    /// Shortest Job First, non-preemptive.
    Sjf,
    /// Shortest Job First, preempting on arrival.
    PreemptiveSjf,
    /// Static priority, non-preemptive.
    Priority,
    /// Static priority, preempting on arrival.
    PreemptivePriority,
}

/// A new element never sorts before one already queued: plain FIFO.
///
/// Comparing arrival stamps would misplace re-queued jobs under
/// Round-Robin, whose arrivals predate the jobs queued behind them.
fn fifo_order(_new: &Job, _queued: &Job) -> Ordering {
    Ordering::Greater
}

fn shortest_remaining(a: &Job, b: &Job) -> Ordering {
    a.remaining_time.cmp(&b.remaining_time)
}

fn priority_then_arrival(a: &Job, b: &Job) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
}

impl SchedulingPolicy {
    /// The ready-queue insertion comparator for this discipline.
    pub fn comparator(&self) -> Comparator<Job> {
        match self {
            Self::Fcfs | Self::RoundRobin => fifo_order,
            Self::Sjf | Self::PreemptiveSjf => shortest_remaining,
            Self::Priority | Self::PreemptivePriority => priority_then_arrival,
        }
    }

    /// Whether an arriving job may evict a running one.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::PreemptiveSjf | Self::PreemptivePriority)
    }

    /// Whether the discipline rotates running jobs on quantum expiry.
    pub fn is_time_sliced(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin => "RR",
            Self::Sjf => "SJF",
            Self::PreemptiveSjf => "PSJF",
            Self::Priority => "PRI",
            Self::PreemptivePriority => "PPRI",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fcfs => "First-Come First-Served",
            Self::RoundRobin => "Round-Robin",
            Self::Sjf => "Shortest Job First",
            Self::PreemptiveSjf => "Preemptive Shortest Job First",
            Self::Priority => "Priority",
            Self::PreemptivePriority => "Preemptive Priority",
        }
    }

    /// Whether `candidate` is a weaker incumbent than `current` — the one
    /// an arriving job would evict first.
    ///
    /// PSJF evicts the longest remaining service; PPRI evicts the lowest
    /// priority, breaking ties toward the later arrival. Both comparisons
    /// are strict, so the lowest-indexed core wins remaining-time ties
    /// under PSJF.
    pub fn more_evictable(&self, candidate: &Job, current: &Job) -> bool {
        match self {
            Self::PreemptiveSjf => candidate.remaining_time > current.remaining_time,
            Self::PreemptivePriority => {
                candidate.priority > current.priority
                    || (candidate.priority == current.priority
                        && candidate.arrival_time > current.arrival_time)
            }
            _ => false,
        }
    }

    /// Whether an arriving `newcomer` dominates `incumbent` strictly
    /// enough to take its core. Ties never preempt.
    pub fn preempts(&self, newcomer: &Job, incumbent: &Job) -> bool {
        match self {
            Self::PreemptiveSjf => newcomer.remaining_time < incumbent.remaining_time,
            Self::PreemptivePriority => newcomer.priority < incumbent.priority,
            _ => false,
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job(id: u64, arrival: u64, service: u64, priority: i32) -> Job {
        Job::new(id, arrival, service, priority)
    }

    #[test]
    fn test_fifo_comparator_always_appends() {
        let cmp = SchedulingPolicy::Fcfs.comparator();
        let early = make_job(0, 0, 5, 0);
        let late = make_job(1, 9, 5, 0);
        assert_eq!(cmp(&late, &early), Ordering::Greater);
        assert_eq!(cmp(&early, &late), Ordering::Greater);
    }

    #[test]
    fn test_sjf_comparator_orders_by_remaining() {
        let cmp = SchedulingPolicy::Sjf.comparator();
        let short = make_job(0, 0, 3, 0);
        let long = make_job(1, 0, 8, 0);
        assert_eq!(cmp(&short, &long), Ordering::Less);
        assert_eq!(cmp(&long, &short), Ordering::Greater);
        assert_eq!(cmp(&short, &short.clone()), Ordering::Equal);
    }

    #[test]
    fn test_priority_comparator_breaks_ties_on_arrival() {
        let cmp = SchedulingPolicy::Priority.comparator();
        let urgent = make_job(0, 5, 4, 1);
        let relaxed = make_job(1, 2, 4, 6);
        assert_eq!(cmp(&urgent, &relaxed), Ordering::Less);

        let earlier = make_job(2, 1, 4, 3);
        let later = make_job(3, 7, 4, 3);
        assert_eq!(cmp(&earlier, &later), Ordering::Less);
        assert_eq!(cmp(&later, &earlier), Ordering::Greater);
    }

    #[test]
    fn test_classification() {
        assert!(SchedulingPolicy::PreemptiveSjf.is_preemptive());
        assert!(SchedulingPolicy::PreemptivePriority.is_preemptive());
        assert!(!SchedulingPolicy::Fcfs.is_preemptive());
        assert!(!SchedulingPolicy::RoundRobin.is_preemptive());
        assert!(!SchedulingPolicy::Sjf.is_preemptive());
        assert!(!SchedulingPolicy::Priority.is_preemptive());

        assert!(SchedulingPolicy::RoundRobin.is_time_sliced());
        assert!(!SchedulingPolicy::PreemptiveSjf.is_time_sliced());
    }

    #[test]
    fn test_psjf_preempts_strictly() {
        let policy = SchedulingPolicy::PreemptiveSjf;
        let mut incumbent = make_job(0, 0, 10, 0);
        incumbent.remaining_time = 5;

        let shorter = make_job(1, 6, 3, 0);
        let equal = make_job(2, 7, 5, 0);
        let longer = make_job(3, 8, 9, 0);

        assert!(policy.preempts(&shorter, &incumbent));
        assert!(!policy.preempts(&equal, &incumbent));
        assert!(!policy.preempts(&longer, &incumbent));
    }

    #[test]
    fn test_ppri_preempts_strictly() {
        let policy = SchedulingPolicy::PreemptivePriority;
        let incumbent = make_job(0, 0, 10, 4);

        assert!(policy.preempts(&make_job(1, 5, 8, 2), &incumbent));
        assert!(!policy.preempts(&make_job(2, 6, 8, 4), &incumbent));
        assert!(!policy.preempts(&make_job(3, 7, 8, 9), &incumbent));
    }

    #[test]
    fn test_non_preemptive_policies_never_preempt() {
        let incumbent = make_job(0, 0, 10, 5);
        let newcomer = make_job(1, 4, 1, 0);

        for policy in [
            SchedulingPolicy::Fcfs,
            SchedulingPolicy::RoundRobin,
            SchedulingPolicy::Sjf,
            SchedulingPolicy::Priority,
        ] {
            assert!(!policy.preempts(&newcomer, &incumbent), "{policy} preempted");
            assert!(!policy.more_evictable(&incumbent, &newcomer));
        }
    }

    #[test]
    fn test_psjf_more_evictable_picks_longest_remaining() {
        let policy = SchedulingPolicy::PreemptiveSjf;
        let mut short = make_job(0, 0, 10, 0);
        short.remaining_time = 4;
        let mut long = make_job(1, 1, 10, 0);
        long.remaining_time = 7;

        assert!(policy.more_evictable(&long, &short));
        assert!(!policy.more_evictable(&short, &long));
        // Equal remaining: neither displaces the other.
        assert!(!policy.more_evictable(&short, &short.clone()));
    }

    #[test]
    fn test_ppri_more_evictable_tie_goes_to_later_arrival() {
        let policy = SchedulingPolicy::PreemptivePriority;
        let weak = make_job(0, 0, 10, 8);
        let strong = make_job(1, 1, 10, 1);
        assert!(policy.more_evictable(&weak, &strong));
        assert!(!policy.more_evictable(&strong, &weak));

        let early = make_job(2, 2, 10, 8);
        let late = make_job(3, 6, 10, 8);
        assert!(policy.more_evictable(&late, &early));
        assert!(!policy.more_evictable(&early, &late));
    }

    #[test]
    fn test_names_and_display() {
        assert_eq!(SchedulingPolicy::Fcfs.name(), "FCFS");
        assert_eq!(SchedulingPolicy::PreemptiveSjf.name(), "PSJF");
        assert_eq!(SchedulingPolicy::RoundRobin.to_string(), "RR");
        assert_eq!(
            SchedulingPolicy::PreemptivePriority.description(),
            "Preemptive Priority"
        );
    }
}
