//! Adaptive meta-policy: value-estimated choice between two eviction rules.
//!
//! Wraps an "oldest-first" and a "newest-first" eviction rule behind a
//! Q-learning-flavored value-estimation layer. Each access draws one rule
//! from a softmax over the two value estimates, applies it if an eviction is
//! needed, and updates the chosen rule's estimate from the observed
//! hit/fault reward. Over a run the policy drifts toward whichever rule has
//! empirically paid off more on the observed trace — an experimental
//! adaptive baseline with no convergence guarantee, not an optimal policy.
//!
//! ## Per-Access Procedure
//!
//! ```text
//!   1. hit? ← membership test
//!   2. P(rule) = exp(β·value(rule)) / Σᵣ exp(β·value(r))
//!   3. draw rule ~ P            (the only randomized step in the crate)
//!   4. fault ∧ full:  oldest-first  → evict sequence head
//!                     newest-first  → evict sequence tail
//!   5. hit keys are removed then re-appended, so every access leaves its
//!      key at the tail (most-recent position) whatever rule was drawn
//!   6. value(chosen) += α · (reward + γ·max(value(·)) − value(chosen))
//!      reward = +1 on hit, −1 on fault; max taken before the update
//! ```
//!
//! The resident sequence is order-significant: front = oldest admission,
//! back = newest. α, β, γ are fixed per run ([`AdaptiveConfig`]).
//!
//! The random source is injected ([`RandomSource`]) and threaded through the
//! whole run; see [`crate::rng`] for why it is never re-seeded per call.

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::error::{check_capacity, ConfigError};
use crate::rng::{RandomSource, XorShift64};
use crate::traits::{Outcome, ReplacementPolicy, Stats};

/// The two candidate eviction rules the meta-policy arbitrates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionRule {
    /// Evict the sequence head (LRU-like under the re-append discipline).
    OldestFirst,
    /// Evict the sequence tail (MRU-like).
    NewestFirst,
}

/// Learning constants for the adaptive policy, fixed for a whole run.
///
/// Defaults match the reference parameterization: α = 0.1, β = 1.0, γ = 0.9.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveConfig {
    /// Learning rate for the temporal-difference update.
    pub alpha: f64,
    /// Softmax temperature for rule selection.
    pub beta: f64,
    /// Discount factor on the bootstrapped future value.
    pub gamma: f64,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 1.0,
            gamma: 0.9,
        }
    }
}

/// Adaptive meta-policy with injectable randomness.
///
/// # Example
///
/// ```
/// use framesim::policy::adaptive::{AdaptiveConfig, AdaptivePolicy};
/// use framesim::rng::XorShift64;
/// use framesim::traits::ReplacementPolicy;
///
/// let rng = XorShift64::new(42);
/// let mut policy = AdaptivePolicy::with_rng(3, AdaptiveConfig::default(), rng).unwrap();
/// for &key in &[1u64, 2, 3, 1, 4, 1, 2] {
///     policy.access(key);
/// }
/// let stats = policy.stats();
/// assert_eq!(stats.hits + stats.faults, 7);
/// ```
#[derive(Debug)]
pub struct AdaptivePolicy<K, R = XorShift64>
where
    K: Copy + Eq + Hash,
    R: RandomSource,
{
    capacity: usize,
    config: AdaptiveConfig,
    /// Front = oldest admission order, back = newest.
    order: VecDeque<K>,
    resident: FxHashSet<K>,
    /// Value estimates indexed [oldest-first, newest-first].
    values: [f64; 2],
    last_rule: Option<EvictionRule>,
    rng: R,
    stats: Stats,
}

impl<K> AdaptivePolicy<K, XorShift64>
where
    K: Copy + Eq + Hash,
{
    /// Creates an adaptive policy with default constants and a fixed-seed
    /// XorShift64 source.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_rng(capacity, AdaptiveConfig::default(), XorShift64::default())
    }
}

impl<K, R> AdaptivePolicy<K, R>
where
    K: Copy + Eq + Hash,
    R: RandomSource,
{
    /// Creates an adaptive policy with explicit constants and random source.
    ///
    /// Fails with [`ConfigError`] if `capacity < 1`.
    pub fn with_rng(capacity: usize, config: AdaptiveConfig, rng: R) -> Result<Self, ConfigError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            config,
            order: VecDeque::with_capacity(capacity),
            resident: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            values: [0.0, 0.0],
            last_rule: None,
            rng,
            stats: Stats::default(),
        })
    }

    /// Current value estimates as (oldest-first, newest-first).
    #[inline]
    pub fn value_estimates(&self) -> (f64, f64) {
        (self.values[0], self.values[1])
    }

    /// The [`EvictionRule`] drawn by the most recent access, or `None` before
    /// the first one. Exposes the arbitration trajectory next to
    /// [`value_estimates`](Self::value_estimates).
    #[inline]
    pub fn last_rule(&self) -> Option<EvictionRule> {
        self.last_rule
    }

    #[inline]
    fn rule_index(rule: EvictionRule) -> usize {
        match rule {
            EvictionRule::OldestFirst => 0,
            EvictionRule::NewestFirst => 1,
        }
    }

    /// Draws a rule from the softmax over the two value estimates.
    fn draw_rule(&mut self) -> EvictionRule {
        let beta = self.config.beta;
        let exp_oldest = (beta * self.values[0]).exp();
        let exp_newest = (beta * self.values[1]).exp();
        let p_oldest = exp_oldest / (exp_oldest + exp_newest);
        if self.rng.next_f64() < p_oldest {
            EvictionRule::OldestFirst
        } else {
            EvictionRule::NewestFirst
        }
    }

    fn evict(&mut self, rule: EvictionRule) -> K {
        let victim = match rule {
            EvictionRule::OldestFirst => self.order.pop_front(),
            EvictionRule::NewestFirst => self.order.pop_back(),
        }
        .expect("eviction requested on empty resident set");
        self.resident.remove(&victim);
        victim
    }

    /// Temporal-difference update of the chosen rule's estimate.
    ///
    /// The bootstrap max is taken over the estimates as they stood before
    /// this update.
    fn update_value(&mut self, rule: EvictionRule, reward: f64) {
        let idx = Self::rule_index(rule);
        let max_value = self.values[0].max(self.values[1]);
        let old = self.values[idx];
        self.values[idx] = old + self.config.alpha * (reward + self.config.gamma * max_value - old);
    }
}

impl<K, R> ReplacementPolicy<K> for AdaptivePolicy<K, R>
where
    K: Copy + Eq + Hash,
    R: RandomSource,
{
    fn access(&mut self, key: K) -> Outcome<K> {
        let hit = self.resident.contains(&key);
        self.stats.record(hit);

        // A rule is drawn on every access, hits included: the value update
        // below always needs a chosen rule to credit.
        let rule = self.draw_rule();
        self.last_rule = Some(rule);

        let evicted = if !hit && self.order.len() >= self.capacity {
            Some(self.evict(rule))
        } else {
            None
        };

        if hit {
            if let Some(idx) = self.order.iter().position(|k| *k == key) {
                let _ = self.order.remove(idx);
            }
        }
        // Every access leaves its key at the tail (most-recent position).
        self.order.push_back(key);
        self.resident.insert(key);

        let reward = if hit { 1.0 } else { -1.0 };
        self.update_value(rule, reward);

        if hit {
            Outcome::Hit
        } else {
            Outcome::Fault { evicted }
        }
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
        self.order.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}
