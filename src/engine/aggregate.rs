//! Turns builder output into result types.

use super::types::{JurisdictionBreakdown, MutuallyExclusivePair, StackingGroup, StackingSummary};
use crate::bonus::IraBonusBreakdown;
use crate::catalog::Compatibility;
use crate::compat::CompatibilityMatrix;
use crate::format::usd;
use crate::grouping::CandidateGroup;
use crate::program::MatchedIncentive;
use std::collections::BTreeSet;

/// Builds the public group for a candidate group over ranked candidates.
pub(crate) fn assemble_group(
    ranked: &[MatchedIncentive],
    matrix: &CompatibilityMatrix,
    group: &CandidateGroup,
) -> StackingGroup {
    let members: Vec<MatchedIncentive> = group.members.iter().map(|&m| ranked[m].clone()).collect();
    let jurisdiction_breakdown = JurisdictionBreakdown::from_matches(&members);

    let mut restrictions: Vec<String> = Vec::new();
    let mut push_unique = |text: &str| {
        if !restrictions.iter().any(|r| r == text) {
            restrictions.push(text.to_string());
        }
    };
    for m in &members {
        for r in &m.program.restrictions {
            push_unique(r.as_str());
        }
    }

    let mut conditional_pairs = 0usize;
    for (k, &i) in group.members.iter().enumerate() {
        for &j in &group.members[k + 1..] {
            if let Some(verdict) = matrix.verdict(i, j) {
                if verdict.compatibility == Compatibility::Conditional {
                    conditional_pairs += 1;
                }
                for c in &verdict.conditions {
                    push_unique(c.as_str());
                }
            }
        }
    }

    let rationale = describe_group(&members, &jurisdiction_breakdown, group.total_value, conditional_pairs);

    StackingGroup {
        members,
        total_value: group.total_value,
        rationale,
        restrictions,
        jurisdiction_breakdown,
    }
}

fn describe_group(
    members: &[MatchedIncentive],
    breakdown: &JurisdictionBreakdown,
    total_value: f64,
    conditional_pairs: usize,
) -> String {
    if let [only] = members {
        return format!(
            "{} ({}) stands alone: no other matched incentive is compatible with it",
            only.name(),
            usd(only.estimated_value)
        );
    }

    let levels: Vec<&str> = breakdown.levels().iter().map(|l| l.as_str()).collect();
    let levels = if levels.is_empty() {
        String::from("no")
    } else {
        levels.join(", ")
    };
    let mut text = format!(
        "{} mutually compatible incentives across {} jurisdiction levels totaling {}",
        members.len(),
        levels,
        usd(total_value)
    );
    match conditional_pairs {
        0 => {}
        1 => text.push_str("; 1 pair stacks conditionally"),
        n => text.push_str(&format!("; {n} pairs stack conditionally")),
    }
    text
}

/// One entry per incompatible pair, higher-ranked member first.
pub(crate) fn exclusive_pairs(
    ranked: &[MatchedIncentive],
    matrix: &CompatibilityMatrix,
) -> Vec<MutuallyExclusivePair> {
    matrix
        .exclusive_pairs()
        .map(|(i, j, verdict)| {
            let first = &ranked[i];
            let second = &ranked[j];
            MutuallyExclusivePair {
                first: first.clone(),
                second: second.clone(),
                basis: verdict.basis,
                reason: verdict.reason.clone(),
                recommendation: format!(
                    "Retain {} ({}) over {} ({})",
                    first.name(),
                    usd(first.estimated_value),
                    second.name(),
                    usd(second.estimated_value)
                ),
            }
        })
        .collect()
}

/// First group with strictly maximal total value.
pub(crate) fn select_optimal(groups: &[StackingGroup]) -> Option<&StackingGroup> {
    let mut best: Option<&StackingGroup> = None;
    for g in groups {
        match best {
            Some(b) if g.total_value <= b.total_value => {}
            _ => best = Some(g),
        }
    }
    best
}

pub(crate) fn summarize(
    matches: &[MatchedIncentive],
    groups: &[CandidateGroup],
    pairs: &[MutuallyExclusivePair],
    bonuses: &[IraBonusBreakdown],
) -> StackingSummary {
    let stackable: BTreeSet<usize> = groups
        .iter()
        .filter(|g| g.members.len() > 1)
        .flat_map(|g| g.members.iter().copied())
        .collect();

    StackingSummary {
        total_incentives_analyzed: matches.len(),
        stackable_count: stackable.len(),
        exclusive_pair_count: pairs.len(),
        potential_value_lost: pairs.iter().map(MutuallyExclusivePair::value_lost).sum(),
        value_by_jurisdiction: JurisdictionBreakdown::from_matches(matches),
        total_bonus_value: bonuses.iter().map(IraBonusBreakdown::bonus_total).sum(),
    }
}
