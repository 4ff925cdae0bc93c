//! Analysis entry point.

use super::aggregate;
use super::config::StackingConfig;
use super::types::{StackingGroup, StackingResult};
use crate::bonus::{BonusCalculator, IraBonusBreakdown};
use crate::catalog::RuleCatalog;
use crate::compat::{CompatibilityMatrix, CompatibilityResolver};
use crate::error::ConfigError;
use crate::grouping::{rank_candidates, GroupBuilder};
use crate::program::MatchedIncentive;
use tracing::info;

/// Runs stacking analyses over matched incentives.
///
/// An engine holds only immutable state (configuration and rule catalog),
/// so one instance can serve any number of calls, from any thread. Each
/// call is independent.
///
/// # Usage
///
/// ```
/// use u_stacking::engine::{StackingConfig, StackingEngine};
/// use u_stacking::program::{IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};
///
/// let matches = vec![
///     MatchedIncentive::new(
///         IncentiveProgram::new("fed", "Federal Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit),
///         100_000.0,
///     ),
///     MatchedIncentive::new(
///         IncentiveProgram::new("st", "State Grant", JurisdictionLevel::State, IncentiveType::Grant),
///         50_000.0,
///     ),
/// ];
///
/// let engine = StackingEngine::new(StackingConfig::default()).unwrap();
/// let result = engine.analyze(&matches);
/// assert_eq!(result.optimal_ids(), vec!["fed", "st"]);
/// assert!((result.total_combined_value - 150_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct StackingEngine {
    config: StackingConfig,
    resolver: CompatibilityResolver,
    builder: GroupBuilder,
}

impl StackingEngine {
    /// Creates an engine over the standard rule catalog.
    pub fn new(config: StackingConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(config, RuleCatalog::standard())
    }

    /// Creates an engine over a custom rule catalog.
    pub fn with_catalog(config: StackingConfig, catalog: RuleCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            builder: GroupBuilder::new(config.max_groups),
            resolver: CompatibilityResolver::new(catalog),
            config,
        })
    }

    /// One-shot analysis with the standard catalog.
    pub fn run(
        matches: &[MatchedIncentive],
        config: &StackingConfig,
    ) -> Result<StackingResult, ConfigError> {
        Ok(Self::new(config.clone())?.analyze(matches))
    }

    pub fn config(&self) -> &StackingConfig {
        &self.config
    }

    pub fn resolver(&self) -> &CompatibilityResolver {
        &self.resolver
    }

    /// Analyzes one project's matched incentives.
    ///
    /// Input is not validated: duplicate ids, negative or NaN values are
    /// processed as given and never cause a panic.
    pub fn analyze(&self, matches: &[MatchedIncentive]) -> StackingResult {
        let catalog_version = self.resolver.catalog().version().to_string();
        info!(
            event = "analysis_start",
            incentives = matches.len(),
            catalog = %catalog_version,
        );

        let ranked = rank_candidates(matches);
        let matrix = CompatibilityMatrix::build(
            &ranked,
            &self.resolver,
            self.config.use_parallel(ranked.len()),
        );

        let candidate_groups = self.builder.build(&ranked, &matrix);
        let groups: Vec<StackingGroup> = candidate_groups
            .iter()
            .map(|g| aggregate::assemble_group(&ranked, &matrix, g))
            .collect();
        let exclusive_pairs = aggregate::exclusive_pairs(&ranked, &matrix);

        let flags = self.config.bonus_flags();
        let bonus_breakdowns: Vec<IraBonusBreakdown> = matches
            .iter()
            .filter_map(|m| BonusCalculator::bonus_for(m, &flags))
            .collect();

        let optimal_group = aggregate::select_optimal(&groups).cloned();
        let total_combined_value = optimal_group.as_ref().map_or(0.0, |g| g.total_value);
        let summary =
            aggregate::summarize(matches, &candidate_groups, &exclusive_pairs, &bonus_breakdowns);

        info!(
            event = "analysis_complete",
            incentives = matches.len(),
            groups = groups.len(),
            exclusive_pairs = exclusive_pairs.len(),
            bonus_breakdowns = bonus_breakdowns.len(),
            total_combined_value,
        );

        StackingResult {
            groups,
            exclusive_pairs,
            optimal_group,
            total_combined_value,
            bonus_breakdowns,
            summary,
            catalog_version,
        }
    }
}
