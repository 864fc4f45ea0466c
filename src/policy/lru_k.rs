//! LRU-K replacement policy (K = 2).
//!
//! Evicts the resident key whose **penultimate** access is furthest in the
//! past, not its most recent one. A single one-off re-reference leaves a key's
//! penultimate tick ancient, so it stays an eviction candidate; a key needs
//! two temporally close accesses to look hot. This discounts one-off
//! re-references and approximates long-run reuse better than plain LRU, at
//! the cost of a second timestamp per entry.
//!
//! ## Timestamp Bookkeeping
//!
//! ```text
//!   Admission (tick t):        entry = { last: t, penultimate: t }
//!                              (no true penultimate history yet)
//!
//!   Hit (tick t):              entry.penultimate = entry.last
//!                              entry.last        = t
//!
//!   Eviction:                  victim = argmin(penultimate)
//! ```
//!
//! ```text
//!   Example (K=2):
//!     page_C: { last: t₈, penultimate: t₂ }  ← evict (oldest penultimate)
//!     page_D: { last: t₉, penultimate: t₅ }
//! ```
//!
//! The two ticks live in a named [`AccessPair`] rather than a positional
//! tuple; swapping `last` and `penultimate` silently is exactly the bug class
//! a named record rules out.
//!
//! ## Academic Reference
//!
//! O'Neil, E. J., O'Neil, P. E., & Weikum, G. (1993).
//! "The LRU-K page replacement algorithm for database disk buffering."
//! ACM SIGMOD Record, 22(2), 297-306.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{check_capacity, ConfigError};
use crate::traits::{Outcome, ReplacementPolicy, Stats};

/// Last and penultimate access ticks for one resident key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AccessPair {
    last: u64,
    penultimate: u64,
}

/// LRU-2 replacement policy keyed on the penultimate access tick.
///
/// Eviction names the victim through [`Outcome::Fault`], so an external cache
/// layered on this index can synchronize its own removal.
///
/// # Example
///
/// ```
/// use framesim::policy::lru_k::LrukPolicy;
/// use framesim::traits::{Outcome, ReplacementPolicy};
///
/// let mut lruk = LrukPolicy::new(2).unwrap();
/// lruk.access(1);
/// lruk.access(2);
/// lruk.access(2); // 2 now has a recent penultimate
/// lruk.access(1); // one-off re-reference; 1's penultimate stays ancient
///
/// // Plain LRU would evict 2 here. LRU-2 evicts 1.
/// assert_eq!(lruk.access(3), Outcome::Fault { evicted: Some(1) });
/// ```
#[derive(Debug)]
pub struct LrukPolicy<K>
where
    K: Copy + Eq + Hash,
{
    capacity: usize,
    history: FxHashMap<K, AccessPair>,
    tick: u64,
    stats: Stats,
}

impl<K> LrukPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an LRU-2 policy with the given frame capacity.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            history: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            tick: 0,
            stats: Stats::default(),
        })
    }

    /// The K in LRU-K. Fixed at 2 for this policy.
    #[inline]
    pub fn k_value(&self) -> usize {
        2
    }

    #[inline]
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_oldest_penultimate(&mut self) -> K {
        // Every stored tick was issued to exactly one access of one key, so
        // penultimate values never collide across keys.
        let victim = self
            .history
            .iter()
            .min_by_key(|(_, pair)| pair.penultimate)
            .map(|(&key, _)| key)
            .expect("eviction requested on empty resident set");
        self.history.remove(&victim);
        victim
    }
}

impl<K> ReplacementPolicy<K> for LrukPolicy<K>
where
    K: Copy + Eq + Hash,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        let tick = self.next_tick();
        if let Some(pair) = self.history.get_mut(&key) {
            pair.penultimate = pair.last;
            pair.last = tick;
            self.stats.record(true);
            return Outcome::Hit;
        }
        self.stats.record(false);

        let evicted = if self.history.len() == self.capacity {
            Some(self.evict_oldest_penultimate())
        } else {
            None
        };
        // Both fields start at the admission tick; there is no real
        // penultimate history yet.
        self.history.insert(
            key,
            AccessPair {
                last: tick,
                penultimate: tick,
            },
        );
        Outcome::Fault { evicted }
    }

    #[inline]
    fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.history.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::lru::LruPolicy;

    #[test]
    fn rejects_zero_capacity() {
        assert!(LrukPolicy::<u64>::new(0).is_err());
    }

    #[test]
    fn admission_sets_both_ticks() {
        let mut lruk = LrukPolicy::new(2).unwrap();
        lruk.access(1u64);
        let pair = lruk.history[&1];
        assert_eq!(pair.last, pair.penultimate);
    }

    #[test]
    fn hit_shifts_last_into_penultimate() {
        let mut lruk = LrukPolicy::new(2).unwrap();
        lruk.access(1u64); // tick 1
        lruk.access(1); // tick 2
        lruk.access(1); // tick 3
        let pair = lruk.history[&1];
        assert_eq!(pair, AccessPair { last: 3, penultimate: 2 });
    }

    #[test]
    fn one_off_rereference_does_not_rescue() {
        // A double-hit key survives; a key with a single recent re-reference
        // but an ancient penultimate does not. Plain LRU decides the
        // opposite on the same trace.
        let trace = [1u64, 2, 2, 2, 1];

        let mut lruk = LrukPolicy::new(2).unwrap();
        let mut lru = LruPolicy::new(2).unwrap();
        for &key in &trace {
            lruk.access(key);
            lru.access(key);
        }

        assert_eq!(lruk.access(3), Outcome::Fault { evicted: Some(1) });
        assert_eq!(lru.access(3), Outcome::Fault { evicted: Some(2) });
    }

    #[test]
    fn cold_keys_evicted_in_admission_order() {
        // With no hits at all, penultimate == admission tick, so LRU-2
        // degenerates to FIFO.
        let mut lruk = LrukPolicy::new(2).unwrap();
        lruk.access(1u64);
        lruk.access(2);
        assert_eq!(lruk.access(3), Outcome::Fault { evicted: Some(1) });
        assert_eq!(lruk.access(4), Outcome::Fault { evicted: Some(2) });
    }

    #[test]
    fn eviction_exposes_victim_key() {
        let mut lruk = LrukPolicy::new(1).unwrap();
        lruk.access(7u64);
        let outcome = lruk.access(8);
        assert_eq!(outcome.evicted(), Some(7));
    }

    #[test]
    fn capacity_never_exceeded() {
        let mut lruk = LrukPolicy::new(4).unwrap();
        for key in 0u64..200 {
            lruk.access(key % 11);
            assert!(lruk.len() <= lruk.capacity());
        }
    }

    #[test]
    fn counts_hits_and_faults() {
        let mut lruk = LrukPolicy::new(4).unwrap();
        for &key in &[1u64, 2, 1, 3, 1] {
            lruk.access(key);
        }
        assert_eq!(lruk.stats(), Stats { hits: 2, faults: 3 });
    }
}
