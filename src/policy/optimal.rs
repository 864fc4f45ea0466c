//! Optimal replacement (Belady's MIN) — the oracle baseline.
//!
//! On a fault with a full resident set, evicts the key whose next use lies
//! farthest in the future (or never occurs again). This minimizes the fault
//! count and is the lower bound every online policy is measured against; no
//! online policy may beat it on the same trace and capacity.
//!
//! ## Not an Online Algorithm
//!
//! This is the one policy that violates the "O(1) lookback" shape of the
//! others: each eviction decision requires random access to the **remainder
//! of the full trace**, so the policy owns a copy of the trace and a cursor
//! advanced once per access. The lookahead is intentionally kept explicit
//! rather than converted into a streaming approximation — its whole purpose
//! is to be a correctness/ceiling baseline.
//!
//! Worst-case eviction cost is O(distinct residents × remaining trace
//! length); a performance concern on long traces, never a correctness one.
//!
//! ## Tie-Breaking
//!
//! Several resident keys are often never referenced again, so "farthest next
//! use" ties on infinity. Ties break to the **lowest key value**, making every
//! run bit-for-bit reproducible. (A naive map-ordered resolution would be
//! arbitrary; the deterministic rule is a deliberate departure.)

use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{check_capacity, ConfigError};
use crate::traits::{Outcome, ReplacementPolicy, Stats};

/// Belady's MIN oracle policy.
///
/// Constructed with the full trace it will be replayed against; `access`
/// consumes that trace one position per call.
///
/// # Example
///
/// ```
/// use framesim::policy::optimal::OptimalPolicy;
/// use framesim::traits::ReplacementPolicy;
///
/// let trace = [1u64, 2, 3, 2, 4, 1, 5, 2, 1, 4, 3, 2, 1, 5, 4];
/// let mut optimal = OptimalPolicy::new(4, &trace).unwrap();
/// for &key in &trace {
///     optimal.access(key);
/// }
/// assert_eq!(optimal.stats().faults, 7);
/// assert_eq!(optimal.stats().hits, 8);
/// ```
#[derive(Debug)]
pub struct OptimalPolicy<K>
where
    K: Copy + Eq + Hash + Ord,
{
    capacity: usize,
    trace: Vec<K>,
    cursor: usize,
    resident: FxHashSet<K>,
    stats: Stats,
}

impl<K> OptimalPolicy<K>
where
    K: Copy + Eq + Hash + Ord,
{
    /// Creates an Optimal policy over `trace` with the given frame capacity.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn new(capacity: usize, trace: &[K]) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            trace: trace.to_vec(),
            cursor: 0,
            resident: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            stats: Stats::default(),
        })
    }

    /// Scans forward from `pos + 1` for each resident key's next occurrence.
    ///
    /// Keys absent from the result are never referenced again.
    fn next_uses(&self, pos: usize) -> FxHashMap<K, usize> {
        let mut next_use =
            FxHashMap::with_capacity_and_hasher(self.resident.len(), Default::default());
        for (offset, future) in self.trace[pos + 1..].iter().enumerate() {
            if next_use.len() == self.resident.len() {
                break;
            }
            if self.resident.contains(future) {
                next_use.entry(*future).or_insert(pos + 1 + offset);
            }
        }
        next_use
    }

    /// Picks the resident key with the farthest next use; never-reused keys
    /// outrank every finite distance, and ties among them go to the lowest
    /// key value.
    fn evict_farthest(&mut self, pos: usize) -> K {
        let next_use = self.next_uses(pos);
        let victim = self
            .resident
            .iter()
            .copied()
            .max_by(|a, b| match (next_use.get(a), next_use.get(b)) {
                // Both never reused: the max under reversed key order is the
                // lowest key, which is the deterministic tie winner.
                (None, None) => b.cmp(a),
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => x.cmp(y),
            })
            .expect("eviction requested on empty resident set");
        self.resident.remove(&victim);
        victim
    }
}

impl<K> ReplacementPolicy<K> for OptimalPolicy<K>
where
    K: Copy + Eq + Hash + Ord,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        let pos = self.cursor;
        self.cursor += 1;
        debug_assert!(
            self.trace.get(pos) == Some(&key),
            "access sequence diverged from the trace given at construction"
        );

        if self.resident.contains(&key) {
            self.stats.record(true);
            return Outcome::Hit;
        }
        self.stats.record(false);

        let evicted = if self.resident.len() == self.capacity {
            Some(self.evict_farthest(pos))
        } else {
            None
        };
        self.resident.insert(key);
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

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_TRACE: [u64; 15] = [1, 2, 3, 2, 4, 1, 5, 2, 1, 4, 3, 2, 1, 5, 4];

    fn replay(capacity: usize, trace: &[u64]) -> (OptimalPolicy<u64>, Vec<Option<u64>>) {
        let mut optimal = OptimalPolicy::new(capacity, trace).unwrap();
        let evictions = trace.iter().map(|&k| optimal.access(k).evicted()).collect();
        (optimal, evictions)
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(OptimalPolicy::<u64>::new(0, &[]).is_err());
    }

    #[test]
    fn golden_reference_trace() {
        let (optimal, _) = replay(4, &REFERENCE_TRACE);
        assert_eq!(optimal.stats(), Stats { hits: 8, faults: 7 });
    }

    #[test]
    fn golden_trace_eviction_sequence() {
        // Fault at 5 evicts 3 (next used at index 10, farthest); fault at 3
        // evicts 4 (index 14); final fault at 4 sees no key reused again and
        // the lowest-key tie-break picks 1.
        let (_, evictions) = replay(4, &REFERENCE_TRACE);
        let victims: Vec<u64> = evictions.into_iter().flatten().collect();
        assert_eq!(victims, vec![3, 4, 1]);
    }

    #[test]
    fn golden_trace_is_reproducible() {
        let (a, ev_a) = replay(4, &REFERENCE_TRACE);
        let (b, ev_b) = replay(4, &REFERENCE_TRACE);
        assert_eq!(a.stats(), b.stats());
        assert_eq!(ev_a, ev_b);
    }

    #[test]
    fn evicts_farthest_future_use() {
        // At the fault on 4, next uses are 1→3, 2→4, 3→5; 3 is farthest.
        let trace = [1u64, 2, 3, 4, 1, 2, 3];
        let (_, evictions) = replay(3, &trace);
        assert_eq!(evictions[3], Some(3));
    }

    #[test]
    fn never_reused_keys_lose_to_reused_ones() {
        // 9 is never seen again while 1 is; 9 must go.
        let trace = [9u64, 1, 2, 3, 1];
        let (_, evictions) = replay(2, &trace);
        assert_eq!(evictions[2], Some(9));
    }

    #[test]
    fn infinite_tie_breaks_to_lowest_key() {
        // Neither 7 nor 3 recurs; the lowest key (3) is evicted.
        let trace = [7u64, 3, 5];
        let (_, evictions) = replay(2, &trace);
        assert_eq!(evictions[2], Some(3));
    }

    #[test]
    fn capacity_never_exceeded() {
        let trace: Vec<u64> = (0..200).map(|i| i % 11).collect();
        let mut optimal = OptimalPolicy::new(4, &trace).unwrap();
        for &key in &trace {
            optimal.access(key);
            assert!(optimal.len() <= optimal.capacity());
        }
    }
}
