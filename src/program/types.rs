//! Incentive program reference data and matched incentives.

use std::collections::BTreeSet;
use std::fmt;

/// Governmental tier issuing a program.
///
/// The derived ordering (federal < state < local < utility) is used to
/// build canonical rule-catalog keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum JurisdictionLevel {
    Federal,
    State,
    Local,
    Utility,
}

impl JurisdictionLevel {
    /// All levels in canonical order.
    pub const ALL: [JurisdictionLevel; 4] = [
        JurisdictionLevel::Federal,
        JurisdictionLevel::State,
        JurisdictionLevel::Local,
        JurisdictionLevel::Utility,
    ];

    /// Lowercase label used in rationale and explanation text.
    pub fn as_str(&self) -> &'static str {
        match self {
            JurisdictionLevel::Federal => "federal",
            JurisdictionLevel::State => "state",
            JurisdictionLevel::Local => "local",
            JurisdictionLevel::Utility => "utility",
        }
    }
}

impl fmt::Display for JurisdictionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial form of an incentive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum IncentiveType {
    TaxCredit,
    Grant,
    Rebate,
    Loan,
}

impl IncentiveType {
    /// All types in canonical order.
    pub const ALL: [IncentiveType; 4] = [
        IncentiveType::TaxCredit,
        IncentiveType::Grant,
        IncentiveType::Rebate,
        IncentiveType::Loan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncentiveType::TaxCredit => "tax_credit",
            IncentiveType::Grant => "grant",
            IncentiveType::Rebate => "rebate",
            IncentiveType::Loan => "loan",
        }
    }
}

impl fmt::Display for IncentiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional bonus-adder rates, as fractions of the base credit value.
///
/// Rates are stored exactly as supplied. The `*_rate` accessors return the
/// usable value: missing, non-finite, zero or negative rates read as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct BonusRates {
    /// Domestic content adder (e.g. `0.10` for 10%).
    pub domestic_content: Option<f64>,
    /// Energy community adder.
    pub energy_community: Option<f64>,
    /// Prevailing wage & apprenticeship adder.
    pub prevailing_wage: Option<f64>,
}

impl BonusRates {
    pub fn domestic_content_rate(&self) -> f64 {
        usable_rate(self.domestic_content)
    }

    pub fn energy_community_rate(&self) -> f64 {
        usable_rate(self.energy_community)
    }

    pub fn prevailing_wage_rate(&self) -> f64 {
        usable_rate(self.prevailing_wage)
    }

    /// Whether at least one category carries a usable rate.
    pub fn has_any(&self) -> bool {
        self.domestic_content_rate() > 0.0
            || self.energy_community_rate() > 0.0
            || self.prevailing_wage_rate() > 0.0
    }
}

fn usable_rate(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => 0.0,
    }
}

/// A government or utility incentive program (read-only reference data).
///
/// # Examples
///
/// ```
/// use u_stacking::program::{IncentiveProgram, IncentiveType, JurisdictionLevel};
///
/// let itc = IncentiveProgram::new(
///     "fed-48e",
///     "Clean Electricity Investment Credit (Section 48E)",
///     JurisdictionLevel::Federal,
///     IncentiveType::TaxCredit,
/// )
/// .with_tag("solar")
/// .with_domestic_content_rate(0.10);
///
/// assert!(itc.has_tag("Solar"));
/// assert!(itc.bonus_rates.has_any());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct IncentiveProgram {
    /// Stable program identifier.
    pub id: String,

    /// Human-readable program name. Also feeds the activity and IRA
    /// section heuristics.
    pub name: String,

    /// Issuing tier.
    pub jurisdiction: JurisdictionLevel,

    /// Financial form.
    pub incentive_type: IncentiveType,

    /// Technology tags, normalized to trimmed lowercase on insertion and
    /// on deserialization.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "deserialize_tags"))]
    pub technology_tags: BTreeSet<String>,

    /// Explicit stackable override. `Some(false)` makes the program
    /// exclusive with every other program.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: Option<bool>,

    /// Free-text restrictions. A restriction naming another program's id
    /// or name makes the pair mutually exclusive.
    #[cfg_attr(feature = "serde", serde(default))]
    pub restrictions: Vec<String>,

    /// Bonus-adder rates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_rates: BonusRates,
}

impl IncentiveProgram {
    /// Creates a program with no tags, no override, no restrictions and
    /// no bonus rates.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        jurisdiction: JurisdictionLevel,
        incentive_type: IncentiveType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            jurisdiction,
            incentive_type,
            technology_tags: BTreeSet::new(),
            stackable: None,
            restrictions: Vec::new(),
            bonus_rates: BonusRates::default(),
        }
    }

    /// Adds a technology tag (normalized to trimmed lowercase).
    pub fn with_tag(mut self, tag: impl AsRef<str>) -> Self {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() {
            self.technology_tags.insert(tag);
        }
        self
    }

    /// Adds several technology tags.
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter().fold(self, |p, t| p.with_tag(t))
    }

    /// Sets the explicit stackable override.
    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = Some(stackable);
        self
    }

    /// Adds a restriction string.
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.restrictions.push(restriction.into());
        self
    }

    pub fn with_domestic_content_rate(mut self, rate: f64) -> Self {
        self.bonus_rates.domestic_content = Some(rate);
        self
    }

    pub fn with_energy_community_rate(mut self, rate: f64) -> Self {
        self.bonus_rates.energy_community = Some(rate);
        self
    }

    pub fn with_prevailing_wage_rate(mut self, rate: f64) -> Self {
        self.bonus_rates.prevailing_wage = Some(rate);
        self
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.technology_tags.contains(&normalize_tag(tag))
    }

    /// Whether this program's restriction list names `other`.
    ///
    /// A restriction names a program when it equals the program's id or
    /// name (case-insensitive) or contains its name.
    pub fn restricts(&self, other: &IncentiveProgram) -> bool {
        let other_id = other.id.trim().to_lowercase();
        let other_name = other.name.trim().to_lowercase();
        self.restrictions.iter().any(|r| {
            let r = r.trim().to_lowercase();
            if r.is_empty() {
                return false;
            }
            (!other_id.is_empty() && r == other_id)
                || (!other_name.is_empty() && r.contains(&other_name))
        })
    }
}

/// Normalizes a tag for comparison.
///
/// Tags pushed directly into `technology_tags` bypass this; the activity
/// classifier normalizes again.
pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(feature = "serde")]
fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect())
}

/// One program matched to one project, with its estimated dollar value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MatchedIncentive {
    /// The matched program.
    pub program: IncentiveProgram,

    /// Project the match belongs to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub project_id: String,

    /// Estimated award value in dollars.
    pub estimated_value: f64,
}

impl MatchedIncentive {
    /// Creates a match with an empty project id.
    pub fn new(program: IncentiveProgram, estimated_value: f64) -> Self {
        Self {
            program,
            project_id: String::new(),
            estimated_value,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Program id shortcut.
    pub fn id(&self) -> &str {
        &self.program.id
    }

    /// Program name shortcut.
    pub fn name(&self) -> &str {
        &self.program.name
    }
}
