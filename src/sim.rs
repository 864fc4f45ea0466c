//! Simulation driver: one linear pass of a trace through a policy.
//!
//! The driver iterates the trace once, invokes the active policy per access,
//! and aggregates hits and faults from the returned outcomes. Data flows one
//! way — trace → driver → `policy.access(key)` → outcome → aggregation —
//! and nothing calls back into the trace source.
//!
//! [`run_with_curve`] additionally records the cumulative hit-rate after
//! every prefix of the trace, which convergence plots consume downstream.
//! Curve recording is opt-in because it allocates one `f64` per access.
//!
//! A zero-length trace is reported, not rejected: the resulting
//! [`RunReport::hit_rate`] is NaN (0/0 is undefined) and the curve is empty.

use std::hash::Hash;

use crate::traits::{ReplacementPolicy, Stats};

/// Aggregate result of replaying one trace through one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Accesses that found their key resident.
    pub hits: u64,
    /// Accesses that did not.
    pub faults: u64,
    /// `hits / (hits + faults)`; NaN for an empty trace.
    pub hit_rate: f64,
    /// Cumulative hit-rate per trace prefix, one entry per access.
    /// Empty unless the run was started through [`run_with_curve`].
    pub hit_rate_curve: Vec<f64>,
}

impl RunReport {
    fn from_stats(stats: Stats, hit_rate_curve: Vec<f64>) -> Self {
        Self {
            hits: stats.hits,
            faults: stats.faults,
            hit_rate: stats.hit_rate(),
            hit_rate_curve,
        }
    }
}

/// Replays `trace` through `policy` and returns the aggregate counts.
///
/// The policy is consumed: an instance lives for exactly one replay and its
/// state is never reused across runs.
///
/// # Example
///
/// ```
/// use framesim::policy::fifo::FifoPolicy;
/// use framesim::sim::run;
///
/// let trace = [1u64, 2, 3, 2, 4];
/// let report = run(&trace, FifoPolicy::new(2).unwrap());
/// assert_eq!(report.faults, 4);
/// assert_eq!(report.hits, 1);
/// ```
pub fn run<K, P>(trace: &[K], policy: P) -> RunReport
where
    K: Copy + Eq + Hash,
    P: ReplacementPolicy<K>,
{
    replay(trace, policy, false)
}

/// Like [`run`], additionally recording the cumulative hit-rate curve.
///
/// # Example
///
/// ```
/// use framesim::policy::lru::LruPolicy;
/// use framesim::sim::run_with_curve;
///
/// let trace = [1u64, 1, 2];
/// let report = run_with_curve(&trace, LruPolicy::new(2).unwrap());
/// assert_eq!(report.hit_rate_curve, vec![0.0, 0.5, 1.0 / 3.0]);
/// ```
pub fn run_with_curve<K, P>(trace: &[K], policy: P) -> RunReport
where
    K: Copy + Eq + Hash,
    P: ReplacementPolicy<K>,
{
    replay(trace, policy, true)
}

fn replay<K, P>(trace: &[K], mut policy: P, record_curve: bool) -> RunReport
where
    K: Copy + Eq + Hash,
    P: ReplacementPolicy<K>,
{
    let mut driver_stats = Stats::default();
    let mut curve = Vec::with_capacity(if record_curve { trace.len() } else { 0 });

    for &key in trace {
        let outcome = policy.access(key);
        driver_stats.record(outcome.is_hit());
        debug_assert!(policy.len() <= policy.capacity());
        if record_curve {
            curve.push(driver_stats.hit_rate());
        }
    }

    // The driver's view of the run and the policy's own counters must agree.
    debug_assert_eq!(driver_stats, policy.stats());
    RunReport::from_stats(driver_stats, curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::fifo::FifoPolicy;
    use crate::policy::lru::LruPolicy;
    use crate::policy::{build_policy, PolicyKind};

    #[test]
    fn conservation_of_accesses() {
        let trace: Vec<u64> = (0..97).map(|i| i % 13).collect();
        for kind in PolicyKind::ALL {
            let policy = build_policy(kind, 5, &trace).unwrap();
            let report = run(&trace, policy);
            assert_eq!(
                report.hits + report.faults,
                trace.len() as u64,
                "{} lost accesses",
                kind.name()
            );
        }
    }

    #[test]
    fn empty_trace_reports_nan_hit_rate() {
        let trace: [u64; 0] = [];
        let report = run(&trace, FifoPolicy::new(4).unwrap());
        assert_eq!(report.hits, 0);
        assert_eq!(report.faults, 0);
        assert!(report.hit_rate.is_nan());
        assert!(report.hit_rate_curve.is_empty());
    }

    #[test]
    fn curve_has_one_entry_per_access() {
        let trace = [1u64, 2, 1, 3, 1];
        let report = run_with_curve(&trace, LruPolicy::new(2).unwrap());
        assert_eq!(report.hit_rate_curve.len(), trace.len());
        let last = *report.hit_rate_curve.last().unwrap();
        assert_eq!(last, report.hit_rate);
    }

    #[test]
    fn curve_is_cumulative_prefix_rate() {
        // [1, 1, 1, 2]: fault, hit, hit, fault.
        let trace = [1u64, 1, 1, 2];
        let report = run_with_curve(&trace, LruPolicy::new(2).unwrap());
        assert_eq!(report.hit_rate_curve, vec![0.0, 0.5, 2.0 / 3.0, 0.5]);
    }

    #[test]
    fn plain_run_skips_curve() {
        let trace = [1u64, 2, 3];
        let report = run(&trace, LruPolicy::new(2).unwrap());
        assert!(report.hit_rate_curve.is_empty());
    }

    #[test]
    fn report_matches_policy_stats() {
        let trace = [1u64, 2, 3, 2, 4, 1];
        let report = run(&trace, FifoPolicy::new(3).unwrap());
        assert_eq!(report.hits, 1);
        assert_eq!(report.faults, 5);
        assert!((report.hit_rate - 1.0 / 6.0).abs() < 1e-12);
    }
}
