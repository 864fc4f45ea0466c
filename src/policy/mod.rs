//! Concrete replacement policies.
//!
//! Each policy is a variant type behind the single
//! [`ReplacementPolicy`](crate::traits::ReplacementPolicy) capability
//! interface, selected at construction time by a [`PolicyKind`] tag — no
//! inheritance hierarchy, no mid-run hot-swapping.
//!
//! | Kind | Type | Notes |
//! |------|------|-------|
//! | [`PolicyKind::Fifo`] | [`fifo::FifoPolicy`] | admission order |
//! | [`PolicyKind::Lru`] | [`lru::LruPolicy`] | last-access tick |
//! | [`PolicyKind::LruK`] | [`lru_k::LrukPolicy`] | penultimate-access tick, K=2 |
//! | [`PolicyKind::TaClock`] | [`ta_clock::TaClockPolicy`] | reference bit + tendency sweep |
//! | [`PolicyKind::Optimal`] | [`optimal::OptimalPolicy`] | oracle lookahead over the trace |
//! | [`PolicyKind::Adaptive`] | [`adaptive::AdaptivePolicy`] | softmax over two eviction rules |

pub mod adaptive;
pub mod fifo;
pub mod lru;
pub mod lru_k;
pub mod optimal;
pub mod ta_clock;

use std::hash::Hash;

use crate::error::ConfigError;
use crate::traits::ReplacementPolicy;

/// Selection tag for [`build_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// First-in, first-out.
    Fifo,
    /// Least recently used.
    Lru,
    /// LRU-K with K = 2.
    LruK,
    /// Clock with tendency counters.
    TaClock,
    /// Belady's MIN oracle.
    Optimal,
    /// Adaptive oldest/newest-first meta-policy.
    Adaptive,
}

impl PolicyKind {
    /// Every kind, in a fixed comparison order (oracle last).
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::LruK,
        PolicyKind::TaClock,
        PolicyKind::Adaptive,
        PolicyKind::Optimal,
    ];

    /// Human-readable policy name for reports.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::LruK => "LRU-2",
            PolicyKind::TaClock => "TA-CLOCK",
            PolicyKind::Optimal => "OPT",
            PolicyKind::Adaptive => "ADAPTIVE",
        }
    }
}

/// Builds a boxed policy of the requested kind and capacity.
///
/// `trace` feeds [`optimal::OptimalPolicy`]'s oracle lookahead and is ignored
/// by every online policy. The adaptive policy gets a default-seeded
/// [`XorShift64`](crate::rng::XorShift64); construct
/// [`adaptive::AdaptivePolicy`] directly to inject a different source.
///
/// Fails with [`ConfigError`] if `capacity < 1`.
///
/// # Example
///
/// ```
/// use framesim::policy::{build_policy, PolicyKind};
/// use framesim::traits::ReplacementPolicy;
///
/// let trace = [1u64, 2, 3, 2, 4];
/// let mut policy = build_policy(PolicyKind::Lru, 2, &trace).unwrap();
/// for &key in &trace {
///     policy.access(key);
/// }
/// assert_eq!(policy.stats().hits, 1);
/// ```
pub fn build_policy<K>(
    kind: PolicyKind,
    capacity: usize,
    trace: &[K],
) -> Result<Box<dyn ReplacementPolicy<K>>, ConfigError>
where
    K: Copy + Eq + Hash + Ord + 'static,
{
    Ok(match kind {
        PolicyKind::Fifo => Box::new(fifo::FifoPolicy::new(capacity)?),
        PolicyKind::Lru => Box::new(lru::LruPolicy::new(capacity)?),
        PolicyKind::LruK => Box::new(lru_k::LrukPolicy::new(capacity)?),
        PolicyKind::TaClock => Box::new(ta_clock::TaClockPolicy::new(capacity)?),
        PolicyKind::Optimal => Box::new(optimal::OptimalPolicy::new(capacity, trace)?),
        PolicyKind::Adaptive => Box::new(adaptive::AdaptivePolicy::new(capacity)?),
    })
}
