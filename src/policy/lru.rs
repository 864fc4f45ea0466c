//! LRU replacement policy.
//!
//! Evicts the resident key with the smallest last-access order. Ordering uses
//! a per-instance logical clock that increments on every access, not
//! wall-clock time, so two accesses can never share a tick and eviction ties
//! are structurally impossible.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    LruPolicy<K> Layout                     │
//! │                                                            │
//! │   last_access: FxHashMap<K, u64>     tick: u64             │
//! │                                                            │
//! │   ┌─────────┬───────────┐                                  │
//! │   │   Key   │ last tick │    eviction = argmin(last tick)  │
//! │   ├─────────┼───────────┤                                  │
//! │   │ page_1  │    t₉     │                                  │
//! │   │ page_2  │    t₃     │  ← least recently used           │
//! │   │ page_3  │    t₇     │                                  │
//! │   └─────────┴───────────┘                                  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Victim selection scans the map (O(n) in capacity). That is the right
//! trade for a simulator replaying traces to compare fault counts; an O(1)
//! production LRU would buy speed with intrusive lists without changing any
//! reported number.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{check_capacity, ConfigError};
use crate::traits::{Outcome, ReplacementPolicy, Stats};

/// Least-recently-used replacement policy.
///
/// # Example
///
/// ```
/// use framesim::policy::lru::LruPolicy;
/// use framesim::traits::{Outcome, ReplacementPolicy};
///
/// let mut lru = LruPolicy::new(2).unwrap();
/// lru.access(1);
/// lru.access(2);
///
/// // The hit refreshes 1, so 2 becomes the victim.
/// assert_eq!(lru.access(1), Outcome::Hit);
/// assert_eq!(lru.access(3), Outcome::Fault { evicted: Some(2) });
/// ```
#[derive(Debug)]
pub struct LruPolicy<K>
where
    K: Copy + Eq + Hash,
{
    capacity: usize,
    last_access: FxHashMap<K, u64>,
    tick: u64,
    stats: Stats,
}

impl<K> LruPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an LRU policy with the given frame capacity.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            last_access: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            tick: 0,
            stats: Stats::default(),
        })
    }

    /// Strictly increasing logical clock; one tick per access.
    #[inline]
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_least_recent(&mut self) -> K {
        // Ticks are unique, so the minimum is unambiguous.
        let victim = self
            .last_access
            .iter()
            .min_by_key(|(_, &tick)| tick)
            .map(|(&key, _)| key)
            .expect("eviction requested on empty resident set");
        self.last_access.remove(&victim);
        victim
    }
}

impl<K> ReplacementPolicy<K> for LruPolicy<K>
where
    K: Copy + Eq + Hash,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        let tick = self.next_tick();
        if let Some(last) = self.last_access.get_mut(&key) {
            *last = tick;
            self.stats.record(true);
            return Outcome::Hit;
        }
        self.stats.record(false);

        let evicted = if self.last_access.len() == self.capacity {
            Some(self.evict_least_recent())
        } else {
            None
        };
        self.last_access.insert(key, tick);
        Outcome::Fault { evicted }
    }

    #[inline]
    fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.last_access.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.last_access.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}
