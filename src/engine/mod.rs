//! Stacking analysis engine.
//!
//! [`StackingEngine`] wires the pieces together for one call:
//!
//! 1. rank candidates by value (ties by program id)
//! 2. resolve every pair into a [`CompatibilityMatrix`](crate::compat::CompatibilityMatrix)
//! 3. build stacking groups with the [`GroupBuilder`](crate::grouping::GroupBuilder)
//! 4. aggregate: per-group jurisdiction breakdowns, optimal group,
//!    mutually exclusive pairs, summary statistics
//! 5. compute IRA bonus breakdowns for bonus-eligible inputs
//!
//! The engine performs no I/O and keeps no state between calls.

mod aggregate;
mod config;
mod runner;
mod types;

pub use config::StackingConfig;
pub use runner::StackingEngine;
pub use types::{
    JurisdictionBreakdown, MutuallyExclusivePair, StackingGroup, StackingResult, StackingSummary,
};
