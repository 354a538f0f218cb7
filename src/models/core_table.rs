//! Processor core slots.
//!
//! Fixed-size table of cores; each slot either holds its running job or
//! is idle. Jobs move between the ready queue and these slots by value,
//! so a job can never be on two cores, or queued and running at once.

use serde::{Deserialize, Serialize};

use super::{CoreId, Job};

/// A fixed table of processor cores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreTable {
    slots: Vec<Option<Job>>,
}

impl CoreTable {
    /// Creates a table with `count` idle cores.
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Number of cores in the table.
    pub fn core_count(&self) -> usize {
        self.slots.len()
    }

    /// Lowest-indexed idle core, if any.
    pub fn lowest_idle(&self) -> Option<CoreId> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// The job running on `core`, if any.
    pub fn occupant(&self, core: CoreId) -> Option<&Job> {
        self.slots.get(core).and_then(|slot| slot.as_ref())
    }

    /// Places `job` on a core. The caller passes a valid idle core index.
    pub fn assign(&mut self, core: CoreId, job: Job) {
        debug_assert!(
            self.slots[core].is_none(),
            "core {core} already occupied by job {:?}",
            self.slots[core].as_ref().map(|j| j.id)
        );
        self.slots[core] = Some(job);
    }

    /// Removes and returns the job on `core`; `None` if the core is idle
    /// or out of range.
    pub fn release(&mut self, core: CoreId) -> Option<Job> {
        self.slots.get_mut(core).and_then(|slot| slot.take())
    }

    /// Iterates over running jobs with their core indices, lowest first.
    pub fn running(&self) -> impl Iterator<Item = (CoreId, &Job)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(core, slot)| slot.as_ref().map(|job| (core, job)))
    }

    /// Mutable variant of [`running`](Self::running).
    pub fn running_mut(&mut self) -> impl Iterator<Item = (CoreId, &mut Job)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(core, slot)| slot.as_mut().map(|job| (core, job)))
    }
}
