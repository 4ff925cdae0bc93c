//! Analysis output types.

use crate::bonus::IraBonusBreakdown;
use crate::compat::VerdictBasis;
use crate::program::{JurisdictionLevel, MatchedIncentive};

/// Dollar value partitioned by jurisdiction level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct JurisdictionBreakdown {
    pub federal: f64,
    pub state: f64,
    pub local: f64,
    pub utility: f64,
}

impl JurisdictionBreakdown {
    /// Breakdown of the estimated values of `matches`.
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchedIncentive>,
    {
        let mut breakdown = Self::default();
        for m in matches {
            breakdown.add(m.program.jurisdiction, m.estimated_value);
        }
        breakdown
    }

    pub fn add(&mut self, level: JurisdictionLevel, value: f64) {
        *self.slot_mut(level) += value;
    }

    pub fn get(&self, level: JurisdictionLevel) -> f64 {
        match level {
            JurisdictionLevel::Federal => self.federal,
            JurisdictionLevel::State => self.state,
            JurisdictionLevel::Local => self.local,
            JurisdictionLevel::Utility => self.utility,
        }
    }

    fn slot_mut(&mut self, level: JurisdictionLevel) -> &mut f64 {
        match level {
            JurisdictionLevel::Federal => &mut self.federal,
            JurisdictionLevel::State => &mut self.state,
            JurisdictionLevel::Local => &mut self.local,
            JurisdictionLevel::Utility => &mut self.utility,
        }
    }

    /// Sum over all levels.
    pub fn total(&self) -> f64 {
        self.federal + self.state + self.local + self.utility
    }

    /// Levels carrying a nonzero value, in canonical order.
    pub fn levels(&self) -> Vec<JurisdictionLevel> {
        JurisdictionLevel::ALL
            .into_iter()
            .filter(|&l| self.get(l) != 0.0)
            .collect()
    }
}

/// A set of pairwise-compatible incentives that can be claimed together.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StackingGroup {
    /// Members, by value descending.
    pub members: Vec<MatchedIncentive>,

    /// Sum of member values.
    pub total_value: f64,

    /// Why the members stack.
    pub rationale: String,

    /// Member restrictions plus conditions of conditional pairs,
    /// deduplicated in first-seen order.
    pub restrictions: Vec<String>,

    /// Member values by jurisdiction level. Sums to `total_value`.
    pub jurisdiction_breakdown: JurisdictionBreakdown,
}

impl StackingGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Program ids of the members, in member order.
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(MatchedIncentive::id).collect()
    }

    pub fn contains(&self, program_id: &str) -> bool {
        self.members.iter().any(|m| m.id() == program_id)
    }
}

/// Two incentives that cannot be claimed together.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MutuallyExclusivePair {
    /// Higher-value member (earlier in ranked order on ties).
    pub first: MatchedIncentive,
    pub second: MatchedIncentive,
    pub basis: VerdictBasis,
    pub reason: String,
    /// Names the member to retain.
    pub recommendation: String,
}

impl MutuallyExclusivePair {
    /// Value forgone by keeping the higher-value member.
    pub fn value_lost(&self) -> f64 {
        self.first.estimated_value.min(self.second.estimated_value)
    }
}

/// Summary statistics over one analysis.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StackingSummary {
    /// Number of input incentives.
    pub total_incentives_analyzed: usize,

    /// Distinct incentives appearing in any group with more than one member.
    pub stackable_count: usize,

    /// Number of mutually exclusive pairs.
    pub exclusive_pair_count: usize,

    /// Sum over exclusive pairs of the lower member value.
    pub potential_value_lost: f64,

    /// Value of all input incentives by jurisdiction level.
    pub value_by_jurisdiction: JurisdictionBreakdown,

    /// Sum of all bonus addends across breakdowns.
    pub total_bonus_value: f64,
}

/// Result envelope of [`StackingEngine::analyze`](super::StackingEngine::analyze).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StackingResult {
    /// Stacking groups by total value descending.
    pub groups: Vec<StackingGroup>,

    /// Every incompatible pair, in ranked order.
    pub exclusive_pairs: Vec<MutuallyExclusivePair>,

    /// Highest-value group; `None` for empty input.
    pub optimal_group: Option<StackingGroup>,

    /// Total value of the optimal group (`0.0` when there is none).
    pub total_combined_value: f64,

    /// Bonus breakdowns for bonus-eligible inputs, in input order.
    pub bonus_breakdowns: Vec<IraBonusBreakdown>,

    pub summary: StackingSummary,

    /// Version of the rule catalog that produced this result.
    pub catalog_version: String,
}

impl StackingResult {
    /// Program ids of the optimal group, empty when there is none.
    pub fn optimal_ids(&self) -> Vec<&str> {
        self.optimal_group
            .as_ref()
            .map(StackingGroup::member_ids)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{IncentiveProgram, IncentiveType};

    fn matched(id: &str, level: JurisdictionLevel, value: f64) -> MatchedIncentive {
        MatchedIncentive::new(IncentiveProgram::new(id, id, level, IncentiveType::Grant), value)
    }

    #[test]
    fn test_breakdown_from_matches() {
        let matches = vec![
            matched("a", JurisdictionLevel::Federal, 100.0),
            matched("b", JurisdictionLevel::State, 50.0),
            matched("c", JurisdictionLevel::State, 25.0),
            matched("d", JurisdictionLevel::Utility, 5.0),
        ];
        let b = JurisdictionBreakdown::from_matches(&matches);
        assert!((b.federal - 100.0).abs() < 1e-9);
        assert!((b.state - 75.0).abs() < 1e-9);
        assert_eq!(b.local, 0.0);
        assert!((b.total() - 180.0).abs() < 1e-9);
        assert_eq!(
            b.levels(),
            vec![JurisdictionLevel::Federal, JurisdictionLevel::State, JurisdictionLevel::Utility]
        );
    }

    #[test]
    fn test_pair_value_lost() {
        let pair = MutuallyExclusivePair {
            first: matched("a", JurisdictionLevel::Federal, 200.0),
            second: matched("b", JurisdictionLevel::Federal, 150.0),
            basis: VerdictBasis::SameActivityFederalCredits,
            reason: String::new(),
            recommendation: String::new(),
        };
        assert!((pair.value_lost() - 150.0).abs() < 1e-9);
    }
}
