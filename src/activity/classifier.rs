//! Keyword classification and activity profiles.

use crate::program::{normalize_tag, IncentiveProgram};
use std::collections::BTreeSet;

/// Underlying technology or project activity an incentive targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Activity {
    Solar,
    EvCharging,
    Hvac,
    AffordableHousing,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Solar,
        Activity::EvCharging,
        Activity::Hvac,
        Activity::AffordableHousing,
    ];

    fn bit(self) -> u8 {
        match self {
            Activity::Solar => 1,
            Activity::EvCharging => 1 << 1,
            Activity::Hvac => 1 << 2,
            Activity::AffordableHousing => 1 << 3,
        }
    }

    /// Single-word keywords for this activity.
    fn words(self) -> &'static [&'static str] {
        match self {
            Activity::Solar => &["solar", "pv", "photovoltaic", "itc"],
            Activity::EvCharging => &["ev", "evs", "evse", "charging", "charger", "chargers"],
            Activity::Hvac => &["hvac", "heatpump", "heatpumps"],
            Activity::AffordableHousing => &["lihtc", "affordable"],
        }
    }

    /// Multi-word keywords, matched on consecutive name tokens.
    fn phrases(self) -> &'static [&'static [&'static str]] {
        match self {
            Activity::Solar => &[],
            Activity::EvCharging => &[&["electric", "vehicle"], &["electric", "vehicles"]],
            Activity::Hvac => &[&["heat", "pump"], &["heat", "pumps"]],
            Activity::AffordableHousing => &[&["low", "income"]],
        }
    }

    fn matches(self, tokens: &[String]) -> bool {
        let words = self.words();
        if tokens.iter().any(|t| words.contains(&t.as_str())) {
            return true;
        }
        self.phrases().iter().any(|phrase| {
            tokens
                .windows(phrase.len())
                .any(|w| w.iter().zip(phrase.iter()).all(|(t, p)| t == p))
        })
    }
}

/// Compact set of [`Activity`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActivitySet(u8);

impl ActivitySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, activity: Activity) {
        self.0 |= activity.bit();
    }

    pub fn contains(&self, activity: Activity) -> bool {
        self.0 & activity.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether the two sets share any activity.
    pub fn intersects(&self, other: &ActivitySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Activity> + '_ {
        Activity::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<Activity> for ActivitySet {
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        let mut set = ActivitySet::empty();
        for a in iter {
            set.insert(a);
        }
        set
    }
}

/// Splits a program name into lowercase alphanumeric tokens.
///
/// "Heat-Pump Rebate (EV-ready)" becomes `["heat", "pump", "rebate", "ev", "ready"]`.
pub(crate) fn tokenize(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Activities a program name points at.
pub fn classify_name(name: &str) -> ActivitySet {
    let tokens = tokenize(name);
    Activity::ALL
        .into_iter()
        .filter(|a| a.matches(&tokens))
        .collect()
}

/// Activity classification computed once per program.
///
/// Pairwise overlap checks compare two profiles structurally instead of
/// re-running keyword matching on every pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityProfile {
    tags: BTreeSet<String>,
    activities: ActivitySet,
}

impl ActivityProfile {
    /// Classifies a program from its technology tags and name.
    pub fn of(program: &IncentiveProgram) -> Self {
        Self {
            tags: program
                .technology_tags
                .iter()
                .map(|t| normalize_tag(t))
                .filter(|t| !t.is_empty())
                .collect(),
            activities: classify_name(&program.name),
        }
    }

    /// Normalized technology tags.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Activities inferred from the program name.
    pub fn activities(&self) -> ActivitySet {
        self.activities
    }

    /// True if the tag sets intersect or both names fall in the same
    /// keyword group.
    pub fn overlaps(&self, other: &ActivityProfile) -> bool {
        self.activities.intersects(&other.activities)
            || self.tags.intersection(&other.tags).next().is_some()
    }
}

/// Whether two programs target the same underlying activity.
///
/// Convenience wrapper that classifies both programs; hot paths should
/// build [`ActivityProfile`]s once and call [`ActivityProfile::overlaps`].
pub fn same_activity(a: &IncentiveProgram, b: &IncentiveProgram) -> bool {
    ActivityProfile::of(a).overlaps(&ActivityProfile::of(b))
}
