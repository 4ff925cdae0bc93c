//! Incentive domain model.
//!
//! [`IncentiveProgram`] is read-only reference data supplied by the caller;
//! [`MatchedIncentive`] pairs a program with one project and an estimated
//! dollar value produced by an external eligibility step. Nothing in this
//! crate mutates either.

mod types;

pub use types::{BonusRates, IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};

pub(crate) use types::normalize_tag;
