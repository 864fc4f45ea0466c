//! # Replacement Policy Contract
//!
//! This module defines the single capability interface shared by every
//! replacement policy, plus the per-access [`Outcome`] and the aggregate
//! [`Stats`] every policy maintains.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌───────────────────────────────────────────┐
//!                 │        ReplacementPolicy<K>               │
//!                 │                                           │
//!                 │  access(&mut, K) → Outcome<K>             │
//!                 │  stats(&) → Stats                         │
//!                 │  contains(&, &K) → bool                   │
//!                 │  len(&) → usize                           │
//!                 │  capacity(&) → usize                      │
//!                 └─────────────────────┬─────────────────────┘
//!                                       │
//!        ┌──────────┬──────────┬────────┴──┬───────────┬───────────┐
//!        ▼          ▼          ▼           ▼           ▼           ▼
//!     FifoPolicy LruPolicy LrukPolicy TaClockPolicy OptimalPolicy AdaptivePolicy
//! ```
//!
//! ## Access Semantics
//!
//! `access(key)` resolves to exactly one of:
//!
//! | Case | Result | Resident set |
//! |------|--------|--------------|
//! | key resident | `Outcome::Hit` | unchanged (metadata only) |
//! | key absent, set not full | `Outcome::Fault { evicted: None }` | key admitted |
//! | key absent, set full | `Outcome::Fault { evicted: Some(victim) }` | victim out, key in |
//!
//! A hit may update whatever recency/reference metadata the policy defines but
//! must never change the *set* of resident keys. On a fault against a full set
//! exactly one victim is named, so an external cache layered on top of a
//! policy can synchronize its own eviction.
//!
//! No `access` call fails for a well-formed key; capacity is validated once at
//! construction (see [`crate::error::ConfigError`]).

use std::hash::Hash;

/// Result of a single access against a replacement policy.
///
/// # Example
///
/// ```
/// use framesim::policy::fifo::FifoPolicy;
/// use framesim::traits::{Outcome, ReplacementPolicy};
///
/// let mut policy = FifoPolicy::new(1).unwrap();
/// assert_eq!(policy.access(1), Outcome::Fault { evicted: None });
/// assert_eq!(policy.access(1), Outcome::Hit);
/// assert_eq!(policy.access(2), Outcome::Fault { evicted: Some(1) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<K> {
    /// The key was resident.
    Hit,
    /// The key was not resident and has been admitted. `evicted` names the
    /// victim removed to make room, or `None` if a frame was free.
    Fault {
        /// Key removed from the resident set, if the set was full.
        evicted: Option<K>,
    },
}

impl<K> Outcome<K> {
    /// Returns `true` for [`Outcome::Hit`].
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit)
    }

    /// Returns the evicted key, if this access displaced one.
    #[inline]
    pub fn evicted(self) -> Option<K> {
        match self {
            Outcome::Hit => None,
            Outcome::Fault { evicted } => evicted,
        }
    }
}

/// Monotonic hit/fault counters owned by a policy instance.
///
/// Constructed fresh with each policy (no process-wide counters) and mutated
/// only by that policy's `access`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Accesses that found their key resident.
    pub hits: u64,
    /// Accesses that did not.
    pub faults: u64,
}

impl Stats {
    /// Records one access outcome.
    #[inline]
    pub(crate) fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.faults += 1;
        }
    }

    /// Total accesses observed so far.
    #[inline]
    pub fn total(&self) -> u64 {
        self.hits + self.faults
    }

    /// Fraction of accesses that hit, in `[0, 1]`.
    ///
    /// Returns NaN before any access has been observed — an undefined rate is
    /// surfaced as NaN rather than a divide-by-zero panic.
    ///
    /// # Example
    ///
    /// ```
    /// use framesim::traits::Stats;
    ///
    /// let empty = Stats::default();
    /// assert!(empty.hit_rate().is_nan());
    ///
    /// let stats = Stats { hits: 3, faults: 1 };
    /// assert_eq!(stats.hit_rate(), 0.75);
    /// ```
    #[inline]
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.total() as f64
    }
}

/// The pluggable decision unit every concrete policy implements.
///
/// A policy instance is constructed once with a capacity, drives exactly one
/// trace replay, and is discarded afterwards. State is exclusively owned by
/// the caller; `access` takes `&mut self` and nothing here is `Sync`-aware.
///
/// # Example
///
/// ```
/// use framesim::policy::lru::LruPolicy;
/// use framesim::traits::ReplacementPolicy;
///
/// fn replay<K, P>(trace: &[K], policy: &mut P) -> u64
/// where
///     K: Copy + Eq + std::hash::Hash,
///     P: ReplacementPolicy<K> + ?Sized,
/// {
///     for &key in trace {
///         let _ = policy.access(key);
///     }
///     policy.stats().faults
/// }
///
/// let mut lru = LruPolicy::new(2).unwrap();
/// assert_eq!(replay(&[1, 2, 1, 3], &mut lru), 3);
/// ```
pub trait ReplacementPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Resolves one access: hit, admission, or eviction-then-admission.
    ///
    /// Must uphold the capacity invariant (`len() <= capacity()` afterwards)
    /// and leave the resident set untouched on a hit.
    fn access(&mut self, key: K) -> Outcome<K>;

    /// Hit/fault counters accumulated by this instance.
    fn stats(&self) -> Stats;

    /// Returns `true` if `key` is currently resident.
    ///
    /// A probe only: never updates recency/reference metadata.
    fn contains(&self, key: &K) -> bool;

    /// Number of currently resident keys.
    fn len(&self) -> usize;

    /// Returns `true` if no key is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident keys.
    fn capacity(&self) -> usize;
}

impl<K, P> ReplacementPolicy<K> for Box<P>
where
    K: Copy + Eq + Hash,
    P: ReplacementPolicy<K> + ?Sized,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        (**self).access(key)
    }

    fn stats(&self) -> Stats {
        (**self).stats()
    }

    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}
