//! Precomputed pairwise compatibility over a candidate list.

use super::resolver::{CompatibilityResolver, Verdict};
use crate::activity::ActivityProfile;
use crate::program::MatchedIncentive;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Verdicts for every unordered pair of candidates.
///
/// Candidates are addressed by their position in the slice passed to
/// [`CompatibilityMatrix::build`], so duplicate program ids never collide.
/// Verdicts are stored once per unordered pair in a row-major upper
/// triangle.
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    n: usize,
    verdicts: Vec<Verdict>,
}

impl CompatibilityMatrix {
    /// Resolves every pair of `candidates`.
    ///
    /// Each candidate is classified once. With the `parallel` feature and
    /// `parallel = true`, pairs are resolved on the rayon pool; results are
    /// collected in pair order, so the matrix is identical either way.
    pub fn build(
        candidates: &[MatchedIncentive],
        resolver: &CompatibilityResolver,
        parallel: bool,
    ) -> Self {
        let n = candidates.len();
        let profiles: Vec<ActivityProfile> = candidates
            .iter()
            .map(|m| ActivityProfile::of(&m.program))
            .collect();

        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let resolve = |&(i, j): &(usize, usize)| {
            let verdict = resolver.resolve_profiled(
                &candidates[i].program,
                &profiles[i],
                &candidates[j].program,
                &profiles[j],
            );
            trace!(
                event = "pair_resolved",
                first = %candidates[i].id(),
                second = %candidates[j].id(),
                compatibility = %verdict.compatibility,
                reason = %verdict.reason,
            );
            verdict
        };

        let verdicts = resolve_pairs(&pairs, resolve, parallel);
        let matrix = Self { n, verdicts };

        debug!(
            event = "matrix_built",
            candidates = n,
            pairs = pairs.len(),
            exclusive = matrix.exclusive_pairs().count(),
            parallel,
        );

        matrix
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        if i == j || i >= self.n || j >= self.n {
            return None;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        Some(i * (2 * self.n - i - 1) / 2 + (j - i - 1))
    }

    /// Verdict for a pair of distinct candidates, in either order.
    pub fn verdict(&self, i: usize, j: usize) -> Option<&Verdict> {
        self.index(i, j).map(|k| &self.verdicts[k])
    }

    /// Whether two candidates may share a group. A candidate is always
    /// compatible with itself; out-of-range indices are not compatible.
    pub fn is_compatible(&self, i: usize, j: usize) -> bool {
        if i == j {
            return i < self.n;
        }
        self.verdict(i, j).is_some_and(Verdict::is_compatible)
    }

    /// Adjacency set of candidate `i`, including `i` itself.
    pub fn compatible_with(&self, i: usize) -> BTreeSet<usize> {
        (0..self.n).filter(|&j| self.is_compatible(i, j)).collect()
    }

    /// Incompatible pairs `(i, j, verdict)` with `i < j`, in row-major order.
    pub fn exclusive_pairs(&self) -> impl Iterator<Item = (usize, usize, &Verdict)> + '_ {
        (0..self.n)
            .flat_map(move |i| (i + 1..self.n).map(move |j| (i, j)))
            .filter_map(move |(i, j)| {
                let v = self.verdict(i, j)?;
                (!v.is_compatible()).then_some((i, j, v))
            })
    }
}

#[cfg(feature = "parallel")]
fn resolve_pairs<F>(pairs: &[(usize, usize)], resolve: F, parallel: bool) -> Vec<Verdict>
where
    F: Fn(&(usize, usize)) -> Verdict + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        pairs.par_iter().map(resolve).collect()
    } else {
        pairs.iter().map(resolve).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn resolve_pairs<F>(pairs: &[(usize, usize)], resolve: F, _parallel: bool) -> Vec<Verdict>
where
    F: Fn(&(usize, usize)) -> Verdict,
{
    pairs.iter().map(resolve).collect()
}
