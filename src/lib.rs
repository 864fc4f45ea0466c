//! framesim: page-replacement policy simulation and comparison.
//!
//! Replays an access trace against a fixed-size resident set ("frames") under a
//! pluggable replacement policy and reports hit/fault counts plus hit-rate.
//!
//! Six policies share one capability interface ([`traits::ReplacementPolicy`]):
//!
//! | Policy | Module | Eviction basis |
//! |--------|--------|----------------|
//! | FIFO | [`policy::fifo`] | Admission order, hits never reorder |
//! | LRU | [`policy::lru`] | Last-access tick |
//! | LRU-K (K=2) | [`policy::lru_k`] | Penultimate-access tick |
//! | TA-CLOCK | [`policy::ta_clock`] | Reference bit + tendency counter sweep |
//! | Optimal | [`policy::optimal`] | Farthest future reuse (oracle baseline) |
//! | Adaptive | [`policy::adaptive`] | Softmax choice between oldest/newest-first |
//!
//! The [`sim`] module drives one linear pass over a trace and aggregates the
//! outcomes. Trace loading, plotting, and CLI parsing live outside this crate.
//!
//! ## Example
//!
//! ```
//! use framesim::policy::lru::LruPolicy;
//! use framesim::sim::run;
//!
//! let trace = [1u64, 2, 3, 2, 4];
//! let policy = LruPolicy::new(2).unwrap();
//! let report = run(&trace, policy);
//!
//! assert_eq!(report.hits + report.faults, 5);
//! ```

pub mod error;
pub mod policy;
pub mod prelude;
pub mod rng;
pub mod sim;
pub mod traits;
