//! Convenience re-exports for the common simulation workflow.
//!
//! ```
//! use framesim::prelude::*;
//!
//! let trace = [1u64, 2, 3, 2, 4];
//! let report = run(&trace, build_policy(PolicyKind::Fifo, 2, &trace).unwrap());
//! assert_eq!(report.faults, 4);
//! ```

pub use crate::error::ConfigError;
pub use crate::policy::adaptive::{AdaptiveConfig, AdaptivePolicy, EvictionRule};
pub use crate::policy::fifo::FifoPolicy;
pub use crate::policy::lru::LruPolicy;
pub use crate::policy::lru_k::LrukPolicy;
pub use crate::policy::optimal::OptimalPolicy;
pub use crate::policy::ta_clock::TaClockPolicy;
pub use crate::policy::{build_policy, PolicyKind};
pub use crate::rng::{RandomSource, XorShift64};
pub use crate::sim::{run, run_with_curve, RunReport};
pub use crate::traits::{Outcome, ReplacementPolicy, Stats};
