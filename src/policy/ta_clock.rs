//! TA-CLOCK: Clock replacement with a tendency counter.
//!
//! A second-chance/Clock variant. The reference bit gives each slot one
//! "grace" pass of the sweeping hand; the tendency counter extends that grace
//! in proportion to the slot's prior active-reference history.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   TaClockPolicy<K> Layout                       │
//! │                                                                 │
//! │   index: FxHashMap<K, usize>   (key → slot index)               │
//! │                                                                 │
//! │   slots: Vec<Slot<K>>          (circular, len ≤ capacity)       │
//! │                                                                 │
//! │     [0]       [1]       [2]       [3]                           │
//! │   ┌──────┐  ┌──────┐  ┌──────┐  ┌──────┐                        │
//! │   │ A    │  │ B    │  │ C    │  │ D    │                        │
//! │   │ r=1  │  │ r=0  │  │ r=0  │  │ r=1  │                        │
//! │   │ t=1  │  │ t=1  │  │ t=0  │  │ t=1  │                        │
//! │   └──────┘  └──────┘  └──────┘  └──────┘                        │
//! │                ▲                                                │
//! │                │ hand                                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sweep Rule (fault with no free slot)
//!
//! ```text
//!   loop from hand, cyclically:
//!     slot = slots[hand]
//!     if slot.referenced == 0 AND slot.tendency == 0:
//!       evict slot's key, install new key (r=1, t=1), hand += 1, stop
//!     if slot.referenced == 0:
//!       slot.tendency -= 1            // no floor; mirrors the reference
//!     slot.referenced = 0             // regardless
//!     hand += 1
//! ```
//!
//! The sweep terminates within `2 × capacity` non-evicting visits: every
//! visited slot has its reference bit cleared, and a slot revisited with the
//! bit already clear strictly loses tendency. Worst case (all slots
//! referenced, all tendencies 1) the victim falls on visit `2 × capacity + 1`.
//!
//! Hits set the reference bit only; the hand does not move and tendency is
//! unchanged.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{check_capacity, ConfigError};
use crate::traits::{Outcome, ReplacementPolicy, Stats};

/// One circular-buffer slot: key plus reference bit and tendency counter.
#[derive(Debug, Clone, Copy)]
struct Slot<K> {
    key: K,
    referenced: bool,
    tendency: i32,
}

impl<K> Slot<K> {
    /// Admission state: one reference grace and one tendency grace.
    #[inline]
    fn admitted(key: K) -> Self {
        Self {
            key,
            referenced: true,
            tendency: 1,
        }
    }
}

/// Clock-with-tendency replacement policy.
///
/// # Example
///
/// ```
/// use framesim::policy::ta_clock::TaClockPolicy;
/// use framesim::traits::{Outcome, ReplacementPolicy};
///
/// let mut clock = TaClockPolicy::new(2).unwrap();
/// clock.access(1);
/// clock.access(2);
/// assert_eq!(clock.access(1), Outcome::Hit);
///
/// // Both slots carry reference + tendency grace, so the sweep strips
/// // them over two passes and the victim is the slot under the hand.
/// let outcome = clock.access(3);
/// assert_eq!(outcome, Outcome::Fault { evicted: Some(1) });
/// ```
#[derive(Debug)]
pub struct TaClockPolicy<K>
where
    K: Copy + Eq + Hash,
{
    capacity: usize,
    slots: Vec<Slot<K>>,
    index: FxHashMap<K, usize>,
    hand: usize,
    last_sweep_visits: usize,
    stats: Stats,
}

impl<K> TaClockPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a TA-CLOCK policy with the given frame capacity.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hand: 0,
            last_sweep_visits: 0,
            stats: Stats::default(),
        })
    }

    /// Slots examined by the most recent eviction sweep, victim included.
    ///
    /// Bounded by `2 × capacity + 1`; zero until the first full-set fault.
    #[inline]
    pub fn last_sweep_visits(&self) -> usize {
        self.last_sweep_visits
    }

    /// Sweeps from the hand until a slot with no remaining grace is found,
    /// installs `key` there, and returns the victim.
    fn sweep_and_replace(&mut self, key: K) -> K {
        let mut visits = 0;
        loop {
            visits += 1;
            debug_assert!(
                visits <= 2 * self.capacity + 1,
                "TA-CLOCK sweep exceeded its termination bound"
            );

            let slot = &mut self.slots[self.hand];
            if !slot.referenced && slot.tendency == 0 {
                let victim = slot.key;
                *slot = Slot::admitted(key);
                self.index.remove(&victim);
                self.index.insert(key, self.hand);
                self.hand = (self.hand + 1) % self.capacity;
                self.last_sweep_visits = visits;
                return victim;
            }
            if !slot.referenced {
                slot.tendency -= 1;
            }
            slot.referenced = false;
            self.hand = (self.hand + 1) % self.capacity;
        }
    }
}

impl<K> ReplacementPolicy<K> for TaClockPolicy<K>
where
    K: Copy + Eq + Hash,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        if let Some(&slot_idx) = self.index.get(&key) {
            self.slots[slot_idx].referenced = true;
            self.stats.record(true);
            return Outcome::Hit;
        }
        self.stats.record(false);

        if self.slots.len() < self.capacity {
            // Free slot in buffer order; no sweep.
            let slot_idx = self.slots.len();
            self.slots.push(Slot::admitted(key));
            self.index.insert(key, slot_idx);
            return Outcome::Fault { evicted: None };
        }

        let victim = self.sweep_and_replace(key);
        Outcome::Fault {
            evicted: Some(victim),
        }
    }

    #[inline]
    fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}
