//! FIFO replacement policy.
//!
//! Evicts the earliest-admitted resident key, irrespective of later hits.
//! Hits never reorder the admission queue — this is the defining FIFO property
//! and the thing that distinguishes it from LRU.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     FifoPolicy<K> Layout                       │
//! │                                                                │
//! │   queue: VecDeque<K>        [A] ─ [B] ─ [C] ─ [D]              │
//! │                              ↑                 ↑               │
//! │                            oldest            newest            │
//! │                                                                │
//! │   resident: FxHashSet<K>    {A, B, C, D}                       │
//! │                                                                │
//! │   Queue and set are kept in lock-step: the key popped from the │
//! │   queue head is always the key removed from the set.           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation | Time | Notes |
//! |-----------|------|-------|
//! | hit       | O(1) | set lookup only, queue untouched |
//! | admission | O(1) | push back + set insert |
//! | eviction  | O(1) | pop front + set remove |

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::error::{check_capacity, ConfigError};
use crate::traits::{Outcome, ReplacementPolicy, Stats};

/// First-in, first-out replacement policy.
///
/// # Example
///
/// ```
/// use framesim::policy::fifo::FifoPolicy;
/// use framesim::traits::{Outcome, ReplacementPolicy};
///
/// let mut fifo = FifoPolicy::new(2).unwrap();
/// fifo.access(1);
/// fifo.access(2);
///
/// // A hit on 1 does not move it out of eviction position.
/// assert_eq!(fifo.access(1), Outcome::Hit);
/// assert_eq!(fifo.access(3), Outcome::Fault { evicted: Some(1) });
/// ```
#[derive(Debug)]
pub struct FifoPolicy<K>
where
    K: Copy + Eq + Hash,
{
    capacity: usize,
    queue: VecDeque<K>,
    resident: FxHashSet<K>,
    stats: Stats,
}

impl<K> FifoPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a FIFO policy with the given frame capacity.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            resident: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            stats: Stats::default(),
        })
    }

    /// Peeks at the next eviction victim without removing it.
    #[inline]
    pub fn peek_oldest(&self) -> Option<&K> {
        self.queue.front()
    }

    #[cfg(debug_assertions)]
    fn debug_check_lockstep(&self) {
        debug_assert_eq!(self.queue.len(), self.resident.len());
        debug_assert!(self.queue.iter().all(|k| self.resident.contains(k)));
    }
}

impl<K> ReplacementPolicy<K> for FifoPolicy<K>
where
    K: Copy + Eq + Hash,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        if self.resident.contains(&key) {
            self.stats.record(true);
            return Outcome::Hit;
        }
        self.stats.record(false);

        let evicted = if self.resident.len() == self.capacity {
            // Queue head and set removal must agree; popping first and
            // removing that exact key keeps them in lock-step.
            let oldest = self
                .queue
                .pop_front()
                .filter(|k| self.resident.remove(k));
            debug_assert!(oldest.is_some());
            oldest
        } else {
            None
        };

        self.queue.push_back(key);
        self.resident.insert(key);

        #[cfg(debug_assertions)]
        self.debug_check_lockstep();

        Outcome::Fault { evicted }
    }

    #[inline]
    fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.resident.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.resident.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}
