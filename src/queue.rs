//! Comparator-ordered ready queue.
//!
//! Generic ordered sequence used as the scheduler's ready queue. The
//! comparator is fixed at construction and consulted only at insertion:
//! an element is placed immediately before the first existing element it
//! compares `Less` than, so equal elements keep their insertion order
//! (FIFO among ties).
//!
//! Backed by a `Vec`; every operation is O(len), which is plenty for the
//! queue lengths a simulation trace produces.

use std::cmp::Ordering;
use std::fmt;

/// Ordering function fixed at queue construction.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// A sequence kept ordered by a comparator.
#[derive(Clone)]
pub struct OrderedQueue<T> {
    items: Vec<T>,
    comparator: Comparator<T>,
}

impl<T> OrderedQueue<T> {
    /// Creates an empty queue ordered by `comparator`.
    pub fn new(comparator: Comparator<T>) -> Self {
        Self {
            items: Vec::new(),
            comparator,
        }
    }

    /// Inserts `item` at its ordered position and returns the zero-based
    /// index it landed at.
    ///
    /// The scan stops at the first element `item` compares `Less` than,
    /// so ties land behind existing equals.
    pub fn insert(&mut self, item: T) -> usize {
        let position = self
            .items
            .iter()
            .position(|existing| (self.comparator)(&item, existing) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.items.insert(position, item);
        position
    }

    /// Front element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Removes and returns the front element.
    pub fn poll(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Element at `index`; `None` if out of range.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes and returns the element at `index`, shifting later
    /// elements forward; `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> OrderedQueue<T> {
    /// Removes every element equal to `target` — value identity, not
    /// comparator equality — and returns how many were removed.
    pub fn remove(&mut self, target: &T) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item != target);
        before - self.items.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}
