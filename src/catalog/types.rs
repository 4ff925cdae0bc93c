//! Compatibility classification and rule records.

use std::fmt;

/// Outcome of a compatibility rule or a pairwise resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Compatibility {
    /// Both awards may be claimed together.
    Stackable,

    /// At most one of the awards may be claimed.
    MutuallyExclusive,

    /// Both awards may be claimed, subject to the rule's conditions.
    Conditional,
}

impl Compatibility {
    /// Whether two awards under this classification may appear in the same
    /// stacking group.
    pub fn permits_stacking(&self) -> bool {
        match self {
            Compatibility::Stackable | Compatibility::Conditional => true,
            Compatibility::MutuallyExclusive => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Stackable => "STACKABLE",
            Compatibility::MutuallyExclusive => "MUTUALLY_EXCLUSIVE",
            Compatibility::Conditional => "CONDITIONAL",
        }
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Rule {
    pub compatibility: Compatibility,
    pub rationale: String,
    /// Human-readable conditions. Empty unless `Conditional`.
    pub conditions: Vec<String>,
}

impl Rule {
    pub fn stackable(rationale: impl Into<String>) -> Self {
        Self {
            compatibility: Compatibility::Stackable,
            rationale: rationale.into(),
            conditions: Vec::new(),
        }
    }

    pub fn exclusive(rationale: impl Into<String>) -> Self {
        Self {
            compatibility: Compatibility::MutuallyExclusive,
            rationale: rationale.into(),
            conditions: Vec::new(),
        }
    }

    pub fn conditional<I, S>(rationale: impl Into<String>, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            compatibility: Compatibility::Conditional,
            rationale: rationale.into(),
            conditions: conditions.into_iter().map(Into::into).collect(),
        }
    }
}
