//! Compatibility rule catalog.
//!
//! Static, versioned tables keyed by jurisdiction-level pair and by
//! incentive-type pair. Each entry is classified as
//! [`Compatibility::Stackable`], [`Compatibility::MutuallyExclusive`] or
//! [`Compatibility::Conditional`] and carries a rationale; conditional
//! entries also list the conditions under which the pair stacks.
//!
//! The catalog has no mutation API. Lookups for pairs without an entry
//! return `None`; the default policy for that case lives in the resolver.

mod rules;
mod types;

pub use rules::{RuleCatalog, CATALOG_VERSION};
pub use types::{Compatibility, Rule};
