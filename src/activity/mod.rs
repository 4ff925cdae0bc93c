//! Activity overlap classification.
//!
//! Decides whether two programs target the same underlying technology or
//! project activity: solar, EV charging, HVAC, or affordable housing.
//! Two programs overlap when their technology tags intersect or when both
//! names fall into the same keyword group.
//!
//! Each program is classified once into an [`ActivityProfile`]; the
//! pairwise check is a set comparison.
//!
//! # Limitations
//!
//! The name heuristic is approximate. Program names that mention a
//! technology only in passing (or not at all) can be misclassified.

mod classifier;

pub use classifier::{classify_name, same_activity, Activity, ActivityProfile, ActivitySet};

pub(crate) use classifier::tokenize;
