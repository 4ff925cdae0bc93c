//! Stacking-group construction.
//!
//! Greedy search for maximal sets of candidates that are pairwise
//! compatible under a precomputed
//! [`CompatibilityMatrix`](crate::compat::CompatibilityMatrix). Candidates
//! are ranked by value (ties broken by program id) before the search, so
//! the result never depends on input order or on how the matrix was
//! computed.

mod builder;

pub use builder::{rank_candidates, CandidateGroup, GroupBuilder};
