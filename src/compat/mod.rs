//! Pairwise compatibility resolution.
//!
//! [`CompatibilityResolver`] decides whether two matched incentives may be
//! claimed together, consulting explicit program overrides and restriction
//! lists first, then the jurisdiction and incentive-type tables of the
//! [`RuleCatalog`](crate::catalog::RuleCatalog), then activity overlap.
//! When nothing applies the pair is compatible.
//!
//! [`CompatibilityMatrix`] runs the resolver over every unordered pair of a
//! candidate list (O(n²)), optionally in parallel with the `parallel`
//! feature, and feeds the group builder.

mod matrix;
mod resolver;

pub use matrix::CompatibilityMatrix;
pub use resolver::{CompatibilityResolver, Verdict, VerdictBasis};
