//! Pairwise compatibility decision.

use crate::activity::ActivityProfile;
use crate::catalog::{Compatibility, Rule, RuleCatalog};
use crate::program::{IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};

/// Which precedence step decided a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum VerdictBasis {
    /// A program's explicit `stackable = false` override.
    ExplicitOverride,
    /// A restriction string naming the other program.
    ExplicitRestriction,
    /// The jurisdiction-level rule table.
    JurisdictionRule,
    /// Two federal tax credits for the same activity.
    SameActivityFederalCredits,
    /// The incentive-type rule table.
    IncentiveTypeRule,
    /// Same incentive type targeting the same activity.
    SameActivitySameType,
    /// Nothing applied; compatible by default.
    Default,
}

/// Result of resolving one pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Verdict {
    pub compatibility: Compatibility,
    pub basis: VerdictBasis,
    pub reason: String,
    /// Conditions attached by conditional rules. Empty otherwise.
    pub conditions: Vec<String>,
}

impl Verdict {
    fn exclusive(basis: VerdictBasis, reason: impl Into<String>) -> Self {
        Self {
            compatibility: Compatibility::MutuallyExclusive,
            basis,
            reason: reason.into(),
            conditions: Vec::new(),
        }
    }

    /// Verdict from a catalog rule, folding in conditions carried from an
    /// earlier conditional rule.
    fn from_rule(basis: VerdictBasis, rule: &Rule, carried: Option<&Rule>) -> Self {
        let mut conditions: Vec<String> = carried.map(|r| r.conditions.clone()).unwrap_or_default();
        for c in &rule.conditions {
            if !conditions.contains(c) {
                conditions.push(c.clone());
            }
        }
        let compatibility = match rule.compatibility {
            Compatibility::MutuallyExclusive => {
                return Self::exclusive(basis, rule.rationale.clone());
            }
            Compatibility::Stackable if conditions.is_empty() => Compatibility::Stackable,
            Compatibility::Stackable | Compatibility::Conditional => Compatibility::Conditional,
        };
        Self {
            compatibility,
            basis,
            reason: rule.rationale.clone(),
            conditions,
        }
    }

    /// Whether the pair may share a stacking group.
    pub fn is_compatible(&self) -> bool {
        self.compatibility.permits_stacking()
    }
}

/// Pairwise compatibility resolver over a [`RuleCatalog`].
///
/// Precedence, first match wins:
///
/// 1. either program has `stackable = Some(false)` → exclusive
/// 2. either restriction list names the other program → exclusive
/// 3. levels differ and the jurisdiction rule is stackable → compatible
///    (a conditional jurisdiction rule only attaches its conditions)
/// 4. same level, both federal tax credits for the same activity → exclusive
/// 5. types differ → the incentive-type rule's classification
/// 6. same type, same activity → exclusive
/// 7. otherwise compatible
///
/// Every step applies one predicate to both programs and catalog lookups
/// are canonical, so `resolve(a, b)` and `resolve(b, a)` always agree.
///
/// Step 7 accepts financial risk: a pair no rule covers is treated as
/// stackable.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityResolver {
    catalog: RuleCatalog,
}

impl CompatibilityResolver {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Resolves two matched incentives.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_stacking::compat::CompatibilityResolver;
    /// use u_stacking::program::{IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};
    ///
    /// let federal = MatchedIncentive::new(
    ///     IncentiveProgram::new("f", "Federal Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit),
    ///     100_000.0,
    /// );
    /// let state = MatchedIncentive::new(
    ///     IncentiveProgram::new("s", "State Grant", JurisdictionLevel::State, IncentiveType::Grant),
    ///     50_000.0,
    /// );
    ///
    /// let resolver = CompatibilityResolver::default();
    /// assert!(resolver.resolve(&federal, &state).is_compatible());
    /// ```
    pub fn resolve(&self, a: &MatchedIncentive, b: &MatchedIncentive) -> Verdict {
        self.resolve_programs(&a.program, &b.program)
    }

    /// Resolves two programs, classifying their activities on the fly.
    pub fn resolve_programs(&self, a: &IncentiveProgram, b: &IncentiveProgram) -> Verdict {
        self.resolve_profiled(a, &ActivityProfile::of(a), b, &ActivityProfile::of(b))
    }

    /// Resolves two programs with precomputed activity profiles.
    pub fn resolve_profiled(
        &self,
        a: &IncentiveProgram,
        profile_a: &ActivityProfile,
        b: &IncentiveProgram,
        profile_b: &ActivityProfile,
    ) -> Verdict {
        if a.stackable == Some(false) || b.stackable == Some(false) {
            return Verdict::exclusive(VerdictBasis::ExplicitOverride, "explicitly non-stackable");
        }

        if a.restricts(b) || b.restricts(a) {
            return Verdict::exclusive(VerdictBasis::ExplicitRestriction, "explicit restriction");
        }

        let types_differ = a.incentive_type != b.incentive_type;
        let mut carried: Option<&Rule> = None;

        if a.jurisdiction != b.jurisdiction {
            if let Some(rule) = self.catalog.jurisdiction_rule(a.jurisdiction, b.jurisdiction) {
                match rule.compatibility {
                    Compatibility::Stackable => {
                        return Verdict::from_rule(VerdictBasis::JurisdictionRule, rule, None);
                    }
                    Compatibility::Conditional => carried = Some(rule),
                    Compatibility::MutuallyExclusive => {}
                }
            }
        } else if is_federal_credit(a) && is_federal_credit(b) && profile_a.overlaps(profile_b) {
            return Verdict::exclusive(
                VerdictBasis::SameActivityFederalCredits,
                "same-activity federal credits exclusive",
            );
        }

        if types_differ {
            if let Some(rule) = self.catalog.incentive_type_rule(a.incentive_type, b.incentive_type) {
                return Verdict::from_rule(VerdictBasis::IncentiveTypeRule, rule, carried);
            }
        } else if profile_a.overlaps(profile_b) {
            return Verdict::exclusive(VerdictBasis::SameActivitySameType, "same activity, same type");
        }

        match carried {
            Some(rule) => Verdict::from_rule(VerdictBasis::JurisdictionRule, rule, None),
            None => Verdict {
                compatibility: Compatibility::Stackable,
                basis: VerdictBasis::Default,
                reason: "no explicit restriction found".to_string(),
                conditions: Vec::new(),
            },
        }
    }
}

fn is_federal_credit(p: &IncentiveProgram) -> bool {
    p.jurisdiction == JurisdictionLevel::Federal && p.incentive_type == IncentiveType::TaxCredit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(
        id: &str,
        name: &str,
        jurisdiction: JurisdictionLevel,
        incentive_type: IncentiveType,
    ) -> IncentiveProgram {
        IncentiveProgram::new(id, name, jurisdiction, incentive_type)
    }

    fn both_orders(resolver: &CompatibilityResolver, a: &IncentiveProgram, b: &IncentiveProgram) -> Verdict {
        let ab = resolver.resolve_programs(a, b);
        let ba = resolver.resolve_programs(b, a);
        assert_eq!(ab, ba, "verdict must not depend on argument order");
        ab
    }

    #[test]
    fn test_explicit_override_wins_over_everything() {
        let resolver = CompatibilityResolver::default();
        let locked = program("a", "Locked Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_stackable(false);
        for &level in &JurisdictionLevel::ALL {
            for &ty in &IncentiveType::ALL {
                let other = program("b", "Other", level, ty).with_stackable(true);
                let v = both_orders(&resolver, &locked, &other);
                assert_eq!(v.compatibility, Compatibility::MutuallyExclusive);
                assert_eq!(v.basis, VerdictBasis::ExplicitOverride);
            }
        }
    }

    #[test]
    fn test_explicit_restriction() {
        let resolver = CompatibilityResolver::default();
        let a = program("fed", "Federal Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit);
        let b = program("st", "State Grant", JurisdictionLevel::State, IncentiveType::Grant)
            .with_restriction("fed");
        let v = both_orders(&resolver, &a, &b);
        assert!(!v.is_compatible());
        assert_eq!(v.basis, VerdictBasis::ExplicitRestriction);
        assert_eq!(v.reason, "explicit restriction");
    }

    #[test]
    fn test_stackable_override_true_does_not_force_compatibility() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "Solar ITC", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_stackable(true);
        let b = program("b", "Residential Solar Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit);
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.basis, VerdictBasis::SameActivityFederalCredits);
    }

    #[test]
    fn test_jurisdiction_rule_stackable() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "Solar Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_tag("solar");
        let b = program("b", "Solar Credit", JurisdictionLevel::State, IncentiveType::TaxCredit)
            .with_tag("solar");
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.compatibility, Compatibility::Stackable);
        assert_eq!(v.basis, VerdictBasis::JurisdictionRule);
    }

    #[test]
    fn test_same_activity_federal_credits() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "Credit A", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_tag("solar");
        let b = program("b", "Credit B", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_tag("solar");
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.compatibility, Compatibility::MutuallyExclusive);
        assert_eq!(v.reason, "same-activity federal credits exclusive");
    }

    #[test]
    fn test_federal_credits_different_activities_default() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "Credit A", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_tag("solar");
        let b = program("b", "Credit B", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
            .with_tag("hvac");
        let v = both_orders(&resolver, &a, &b);
        assert!(v.is_compatible());
        assert_eq!(v.basis, VerdictBasis::Default);
        assert_eq!(v.reason, "no explicit restriction found");
    }

    #[test]
    fn test_same_level_types_differ_uses_type_rule() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "State Credit", JurisdictionLevel::State, IncentiveType::TaxCredit)
            .with_tag("solar");
        let b = program("b", "State Grant", JurisdictionLevel::State, IncentiveType::Grant)
            .with_tag("solar");
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.compatibility, Compatibility::Stackable);
        assert_eq!(v.basis, VerdictBasis::IncentiveTypeRule);
    }

    #[test]
    fn test_conditional_type_rule_is_compatible_with_conditions() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "State Credit", JurisdictionLevel::State, IncentiveType::TaxCredit);
        let b = program("b", "State Rebate", JurisdictionLevel::State, IncentiveType::Rebate);
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.compatibility, Compatibility::Conditional);
        assert!(v.is_compatible());
        assert_eq!(v.conditions.len(), 1);
    }

    #[test]
    fn test_conditional_jurisdiction_conditions_carried() {
        let resolver = CompatibilityResolver::default();
        let fed = program("a", "Federal Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit);
        let utility = program("b", "Utility Rebate", JurisdictionLevel::Utility, IncentiveType::Rebate);
        let v = both_orders(&resolver, &fed, &utility);
        assert_eq!(v.compatibility, Compatibility::Conditional);
        assert_eq!(v.basis, VerdictBasis::IncentiveTypeRule);
        // one condition from the jurisdiction rule, one from the type rule
        assert_eq!(v.conditions.len(), 2);

        let fed_grant = program("c", "Federal Grant", JurisdictionLevel::Federal, IncentiveType::Grant);
        let utility_grant = program("d", "Utility Grant", JurisdictionLevel::Utility, IncentiveType::Grant);
        let v = both_orders(&resolver, &fed_grant, &utility_grant);
        assert_eq!(v.compatibility, Compatibility::Conditional);
        assert_eq!(v.basis, VerdictBasis::JurisdictionRule);
        assert_eq!(v.conditions.len(), 1);
    }

    #[test]
    fn test_conditional_jurisdiction_then_same_activity_same_type() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "Federal EV Grant", JurisdictionLevel::Federal, IncentiveType::Grant);
        let b = program("b", "Utility Charging Grant", JurisdictionLevel::Utility, IncentiveType::Grant);
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.compatibility, Compatibility::MutuallyExclusive);
        assert_eq!(v.basis, VerdictBasis::SameActivitySameType);
    }

    #[test]
    fn test_same_activity_same_type() {
        let resolver = CompatibilityResolver::default();
        let a = program("a", "Grant A", JurisdictionLevel::State, IncentiveType::Grant).with_tag("ev");
        let b = program("b", "Grant B", JurisdictionLevel::State, IncentiveType::Grant).with_tag("EV");
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.reason, "same activity, same type");
    }

    #[test]
    fn test_exclusive_type_rule_from_custom_catalog() {
        let catalog = RuleCatalog::from_rules(
            "custom",
            Vec::<(JurisdictionLevel, JurisdictionLevel, Rule)>::new(),
            [(
                IncentiveType::Loan,
                IncentiveType::Grant,
                Rule::exclusive("loan funds may not match grant funds"),
            )],
        );
        let resolver = CompatibilityResolver::new(catalog);
        let a = program("a", "Loan", JurisdictionLevel::State, IncentiveType::Loan);
        let b = program("b", "Grant", JurisdictionLevel::Local, IncentiveType::Grant);
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.compatibility, Compatibility::MutuallyExclusive);
        assert_eq!(v.reason, "loan funds may not match grant funds");
    }

    #[test]
    fn test_empty_catalog_defaults_to_compatible() {
        let catalog = RuleCatalog::from_rules(
            "empty",
            Vec::<(JurisdictionLevel, JurisdictionLevel, Rule)>::new(),
            Vec::<(IncentiveType, IncentiveType, Rule)>::new(),
        );
        let resolver = CompatibilityResolver::new(catalog);
        let a = program("a", "Alpha", JurisdictionLevel::State, IncentiveType::Loan);
        let b = program("b", "Beta", JurisdictionLevel::Local, IncentiveType::Grant);
        let v = both_orders(&resolver, &a, &b);
        assert_eq!(v.basis, VerdictBasis::Default);
        assert!(v.is_compatible());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_level() -> impl Strategy<Value = JurisdictionLevel> {
            prop::sample::select(JurisdictionLevel::ALL.to_vec())
        }

        fn arb_type() -> impl Strategy<Value = IncentiveType> {
            prop::sample::select(IncentiveType::ALL.to_vec())
        }

        fn arb_program(id: &'static str) -> impl Strategy<Value = IncentiveProgram> {
            let names = prop::sample::select(vec![
                "Solar ITC",
                "Heat Pump Rebate",
                "EV Charging Grant",
                "LIHTC Allocation",
                "Main Street Fund",
                "Section 48E Credit",
            ]);
            let tags = prop::collection::btree_set(
                prop::sample::select(vec!["solar", "ev", "hvac", "storage"]),
                0..3,
            );
            (
                arb_level(),
                arb_type(),
                names,
                tags,
                prop::option::of(any::<bool>()),
                any::<bool>(),
            )
                .prop_map(move |(level, ty, name, tags, stackable, restrict)| {
                    let mut p = IncentiveProgram::new(id, name, level, ty).with_tags(tags);
                    p.stackable = stackable;
                    if restrict {
                        p = p.with_restriction(if id == "a" { "b" } else { "a" });
                    }
                    p
                })
        }

        proptest! {
            #[test]
            fn test_resolve_is_symmetric(a in arb_program("a"), b in arb_program("b")) {
                let resolver = CompatibilityResolver::default();
                prop_assert_eq!(resolver.resolve_programs(&a, &b), resolver.resolve_programs(&b, &a));
            }
        }
    }
}
