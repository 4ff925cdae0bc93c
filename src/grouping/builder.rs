//! Greedy stacking-group search.

use crate::compat::CompatibilityMatrix;
use crate::program::MatchedIncentive;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// Orders candidates by estimated value descending, then program id
/// ascending.
///
/// `total_cmp` keeps the order total even for NaN values, so the ranking
/// (and everything built on it) is deterministic.
pub fn rank_candidates(matches: &[MatchedIncentive]) -> Vec<MatchedIncentive> {
    let mut ranked = matches.to_vec();
    ranked.sort_by(compare_candidates);
    ranked
}

fn compare_candidates(a: &MatchedIncentive, b: &MatchedIncentive) -> Ordering {
    b.estimated_value
        .total_cmp(&a.estimated_value)
        .then_with(|| a.id().cmp(b.id()))
}

/// A fully pairwise-compatible set of candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroup {
    /// Candidate indices, ascending (i.e. in ranked order).
    pub members: Vec<usize>,
    /// Sum of member values.
    pub total_value: f64,
}

impl CandidateGroup {
    /// Whether every member of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &CandidateGroup) -> bool {
        self.members
            .iter()
            .all(|m| other.members.binary_search(m).is_ok())
    }
}

/// Assembles maximal mutually-compatible groups from ranked candidates.
///
/// Each candidate, in ranked order, seeds a group unless it already belongs
/// to an accepted group; candidates ranked after the seed join when
/// compatible with **every** current member, so groups are cliques of the
/// compatibility relation rather than connected chains.
///
/// - single-member groups are discarded unless no group has been accepted
///   yet, so non-empty input always yields at least one group
/// - a group whose members are a subset of an accepted group is rejected
/// - the search stops after `max_groups` accepted groups
///
/// Groups are returned by total value descending; ties keep discovery
/// order.
///
/// Runs in O(n² · max_groups). This suits the tens of matched incentives a
/// project usually carries; hundreds of candidates would need an indexed
/// clique search instead.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    max_groups: usize,
}

impl GroupBuilder {
    pub fn new(max_groups: usize) -> Self {
        Self { max_groups }
    }

    pub fn max_groups(&self) -> usize {
        self.max_groups
    }

    /// Builds groups over `candidates`, which must be in ranked order
    /// (see [`rank_candidates`]) and indexed like `matrix`.
    pub fn build(
        &self,
        candidates: &[MatchedIncentive],
        matrix: &CompatibilityMatrix,
    ) -> Vec<CandidateGroup> {
        let n = candidates.len().min(matrix.len());
        let adjacency: Vec<BTreeSet<usize>> = (0..n).map(|i| matrix.compatible_with(i)).collect();
        let mut exhausted: BTreeSet<usize> = BTreeSet::new();
        let mut accepted: Vec<CandidateGroup> = Vec::new();

        for seed in 0..n {
            if accepted.len() >= self.max_groups {
                break;
            }
            if exhausted.contains(&seed) {
                continue;
            }

            let mut members = vec![seed];
            for candidate in seed + 1..n {
                if members.iter().all(|&m| adjacency[m].contains(&candidate)) {
                    members.push(candidate);
                }
            }

            if members.len() == 1 && !accepted.is_empty() {
                debug!(
                    event = "group_rejected",
                    seed = %candidates[seed].id(),
                    cause = "singleton",
                );
                continue;
            }

            let total_value = members.iter().map(|&m| candidates[m].estimated_value).sum();
            let group = CandidateGroup {
                members,
                total_value,
            };

            if accepted.iter().any(|g| group.is_subset_of(g)) {
                debug!(
                    event = "group_rejected",
                    seed = %candidates[seed].id(),
                    cause = "subset",
                    size = group.members.len(),
                );
                continue;
            }

            debug!(
                event = "group_accepted",
                seed = %candidates[seed].id(),
                size = group.members.len(),
                total_value = group.total_value,
            );
            exhausted.extend(group.members.iter().copied());
            accepted.push(group);
        }

        accepted.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
        accepted
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new(5)
    }
}
