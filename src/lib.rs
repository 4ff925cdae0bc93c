//! Incentive stacking and compatibility analysis.
//!
//! Given the incentives a project has been matched to (federal, state,
//! local and utility programs, each with an estimated dollar value),
//! determines which of them can legally be claimed together:
//!
//! - **Program model** ([`program`]): programs, jurisdiction levels,
//!   incentive types, matched incentives.
//! - **Rule catalog** ([`catalog`]): versioned compatibility tables keyed
//!   by jurisdiction-level pair and incentive-type pair.
//! - **Activity classification** ([`activity`]): whether two programs fund
//!   the same technology, from tags and name keywords.
//! - **Compatibility resolution** ([`compat`]): a single precedence chain
//!   yielding a symmetric verdict per pair, and the pairwise matrix.
//! - **Group building** ([`grouping`]): greedy construction of maximal,
//!   pairwise-compatible stacking groups.
//! - **IRA bonuses** ([`bonus`]): domestic content, energy community and
//!   prevailing wage adders for base credits.
//! - **Engine** ([`engine`]): one call producing groups, the optimal
//!   group, mutually exclusive pairs, bonus breakdowns and a summary.
//!
//! # Architecture
//!
//! The engine is a pure computation over in-memory values. It performs no
//! I/O and holds no mutable state, so one [`StackingEngine`] can be shared
//! across threads. With the `parallel` feature, pairwise resolution for
//! large candidate sets runs on the rayon pool; results are identical to
//! the sequential path.
//!
//! # Example
//!
//! ```
//! use u_stacking::{StackingConfig, StackingEngine};
//! use u_stacking::program::{IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};
//!
//! let solar = |id: &str, value: f64| {
//!     MatchedIncentive::new(
//!         IncentiveProgram::new(id, id, JurisdictionLevel::Federal, IncentiveType::TaxCredit)
//!             .with_tag("solar"),
//!         value,
//!     )
//! };
//!
//! let result = StackingEngine::run(&[solar("itc", 200_000.0), solar("ptc", 150_000.0)], &StackingConfig::default())
//!     .unwrap();
//! assert_eq!(result.optimal_ids(), vec!["itc"]);
//! assert_eq!(result.exclusive_pairs.len(), 1);
//! ```

pub mod activity;
pub mod bonus;
pub mod catalog;
pub mod compat;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod program;

mod format;

pub use engine::{
    JurisdictionBreakdown, MutuallyExclusivePair, StackingConfig, StackingEngine, StackingGroup,
    StackingResult, StackingSummary,
};
pub use error::ConfigError;
