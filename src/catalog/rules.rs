//! Rule catalog with canonical pair keys.

use super::types::Rule;
use crate::program::{IncentiveType, JurisdictionLevel};
use std::collections::HashMap;

/// Version tag of the rule set built by [`RuleCatalog::standard`].
pub const CATALOG_VERSION: &str = "2024.1";

/// Sorts a pair so `(a, b)` and `(b, a)` share one key.
fn canonical<T: Ord + Copy>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Immutable compatibility rule tables.
///
/// Lookups are order-independent: the pair is sorted before lookup, so
/// symmetry does not depend on callers checking both directions.
///
/// # Examples
///
/// ```
/// use u_stacking::catalog::{Compatibility, RuleCatalog};
/// use u_stacking::program::JurisdictionLevel;
///
/// let catalog = RuleCatalog::standard();
/// let rule = catalog
///     .jurisdiction_rule(JurisdictionLevel::State, JurisdictionLevel::Federal)
///     .unwrap();
/// assert_eq!(rule.compatibility, Compatibility::Stackable);
/// ```
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    version: String,
    jurisdiction: HashMap<(JurisdictionLevel, JurisdictionLevel), Rule>,
    incentive_type: HashMap<(IncentiveType, IncentiveType), Rule>,
}

impl RuleCatalog {
    /// Builds a custom catalog. Later entries for the same canonical pair
    /// replace earlier ones.
    pub fn from_rules<J, T>(version: impl Into<String>, jurisdiction_rules: J, type_rules: T) -> Self
    where
        J: IntoIterator<Item = (JurisdictionLevel, JurisdictionLevel, Rule)>,
        T: IntoIterator<Item = (IncentiveType, IncentiveType, Rule)>,
    {
        Self {
            version: version.into(),
            jurisdiction: jurisdiction_rules
                .into_iter()
                .map(|(a, b, rule)| (canonical(a, b), rule))
                .collect(),
            incentive_type: type_rules
                .into_iter()
                .map(|(a, b, rule)| (canonical(a, b), rule))
                .collect(),
        }
    }

    /// The shipped rule set.
    pub fn standard() -> Self {
        use IncentiveType::*;
        use JurisdictionLevel::*;

        let jurisdiction_rules = [
            (
                Federal,
                State,
                Rule::stackable("Federal and state programs are funded independently and generally stack"),
            ),
            (
                Federal,
                Local,
                Rule::stackable("Federal and local programs are funded independently and generally stack"),
            ),
            (
                Federal,
                Utility,
                Rule::conditional(
                    "Utility incentives stack with federal credits but may be taxable or basis-reducing",
                    ["Utility rebates may reduce the eligible basis of federal tax credits"],
                ),
            ),
            (
                State,
                Local,
                Rule::stackable("State and local programs are administered separately and generally stack"),
            ),
            (
                State,
                Utility,
                Rule::stackable("State programs and utility incentives generally stack"),
            ),
            (
                Local,
                Utility,
                Rule::stackable("Local programs and utility incentives generally stack"),
            ),
        ];

        let type_rules = [
            (
                TaxCredit,
                Grant,
                Rule::stackable("Tax credits and grants are distinct award forms and generally stack"),
            ),
            (
                TaxCredit,
                Rebate,
                Rule::conditional(
                    "Rebates stack with tax credits subject to basis adjustment",
                    ["Rebate amount may reduce the eligible basis of the tax credit"],
                ),
            ),
            (
                TaxCredit,
                Loan,
                Rule::stackable("Financing does not reduce tax credit eligibility"),
            ),
            (
                Grant,
                Rebate,
                Rule::conditional(
                    "Grants and rebates stack subject to total cost limits",
                    ["Combined grant and rebate awards may not exceed total project cost"],
                ),
            ),
            (
                Grant,
                Loan,
                Rule::stackable("Grant funding and loan financing generally stack"),
            ),
            (
                Rebate,
                Loan,
                Rule::stackable("Rebates and loan financing generally stack"),
            ),
        ];

        Self::from_rules(CATALOG_VERSION, jurisdiction_rules, type_rules)
    }

    /// Catalog version tag.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rule for a jurisdiction-level pair, in either order.
    pub fn jurisdiction_rule(&self, a: JurisdictionLevel, b: JurisdictionLevel) -> Option<&Rule> {
        self.jurisdiction.get(&canonical(a, b))
    }

    /// Rule for an incentive-type pair, in either order.
    pub fn incentive_type_rule(&self, a: IncentiveType, b: IncentiveType) -> Option<&Rule> {
        self.incentive_type.get(&canonical(a, b))
    }

    /// Number of jurisdiction rules.
    pub fn jurisdiction_rule_count(&self) -> usize {
        self.jurisdiction.len()
    }

    /// Number of incentive-type rules.
    pub fn incentive_type_rule_count(&self) -> usize {
        self.incentive_type.len()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
