//! Engine configuration.

use crate::bonus::BonusFlags;
use crate::error::ConfigError;

/// Configuration for a stacking analysis.
///
/// The three eligibility flags enable the corresponding IRA bonus adders;
/// `max_groups` caps the number of stacking groups returned.
///
/// # Examples
///
/// ```
/// use u_stacking::engine::StackingConfig;
///
/// let config = StackingConfig::default()
///     .with_domestic_content_eligible(true)
///     .with_max_groups(3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_groups, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct StackingConfig {
    /// Project meets domestic content requirements.
    pub domestic_content_eligible: bool,

    /// Project is located in an energy community.
    pub energy_community_eligible: bool,

    /// Project commits to prevailing wage & apprenticeship requirements.
    pub prevailing_wage_commitment: bool,

    /// Maximum number of stacking groups returned. Must be at least 1.
    pub max_groups: usize,

    /// Whether pairwise resolution may run on the rayon pool.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,

    /// Minimum candidate count before pairwise resolution goes parallel.
    pub parallel_threshold: usize,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            domestic_content_eligible: false,
            energy_community_eligible: false,
            prevailing_wage_commitment: false,
            max_groups: 5,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl StackingConfig {
    pub fn with_domestic_content_eligible(mut self, eligible: bool) -> Self {
        self.domestic_content_eligible = eligible;
        self
    }

    pub fn with_energy_community_eligible(mut self, eligible: bool) -> Self {
        self.energy_community_eligible = eligible;
        self
    }

    pub fn with_prevailing_wage_commitment(mut self, committed: bool) -> Self {
        self.prevailing_wage_commitment = committed;
        self
    }

    pub fn with_max_groups(mut self, n: usize) -> Self {
        self.max_groups = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }

    /// Bonus eligibility flags derived from this configuration.
    pub fn bonus_flags(&self) -> BonusFlags {
        BonusFlags {
            domestic_content: self.domestic_content_eligible,
            energy_community: self.energy_community_eligible,
            prevailing_wage: self.prevailing_wage_commitment,
        }
    }

    /// Whether `candidates` items should be resolved in parallel.
    pub(crate) fn use_parallel(&self, candidates: usize) -> bool {
        self.parallel && candidates >= self.parallel_threshold
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_groups == 0 {
            return Err(ConfigError::InvalidMaxGroups(self.max_groups));
        }
        if self.parallel_threshold < 2 {
            return Err(ConfigError::InvalidParallelThreshold(self.parallel_threshold));
        }
        Ok(())
    }
}
