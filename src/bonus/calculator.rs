//! IRA bonus-adder computation.

use crate::activity::tokenize;
use crate::format::{percent, usd};
use crate::program::{IncentiveProgram, MatchedIncentive};

/// Federal credit sections that carry a letter (or are unambiguous) and
/// match as standalone name tokens.
const LETTERED_SECTIONS: &[&str] = &[
    "45l", "45q", "45v", "45w", "45x", "45y", "45z", "48c", "48e", "25c", "25d", "30c", "179d",
];

/// Bare-number sections; these only match after "section", "sec", "irc" or "§".
const NUMERIC_SECTIONS: &[&str] = &["45", "48"];

const SECTION_PREFIXES: &[&str] = &["section", "sec", "irc"];

const CREDIT_PHRASES: &[&[&str]] = &[
    &["investment", "tax", "credit"],
    &["production", "tax", "credit"],
];

/// Project-level bonus eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusFlags {
    /// Project meets domestic content requirements.
    pub domestic_content: bool,
    /// Project sits in an energy community.
    pub energy_community: bool,
    /// Project commits to prevailing wage & apprenticeship.
    pub prevailing_wage: bool,
}

/// Bonus-adder breakdown for one bonus-eligible program.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct IraBonusBreakdown {
    pub program_id: String,
    pub program_name: String,
    pub base_value: f64,
    pub domestic_content_bonus: f64,
    pub energy_community_bonus: f64,
    pub prevailing_wage_bonus: f64,
    pub total_with_bonuses: f64,
    pub explanation: String,
}

impl IraBonusBreakdown {
    /// Sum of the three addends.
    pub fn bonus_total(&self) -> f64 {
        self.domestic_content_bonus + self.energy_community_bonus + self.prevailing_wage_bonus
    }
}

/// Computes bonus adders for IRA-style base credits.
///
/// # Examples
///
/// ```
/// use u_stacking::bonus::{BonusCalculator, BonusFlags};
/// use u_stacking::program::{IncentiveProgram, IncentiveType, JurisdictionLevel, MatchedIncentive};
///
/// let credit = MatchedIncentive::new(
///     IncentiveProgram::new("itc", "Section 48E Credit", JurisdictionLevel::Federal, IncentiveType::TaxCredit)
///         .with_domestic_content_rate(0.10),
///     100_000.0,
/// );
/// let flags = BonusFlags { domestic_content: true, ..BonusFlags::default() };
///
/// let breakdown = BonusCalculator::bonus_for(&credit, &flags).unwrap();
/// assert!((breakdown.total_with_bonuses - 110_000.0).abs() < 1e-6);
/// ```
pub struct BonusCalculator;

impl BonusCalculator {
    /// Breakdown for `incentive`, or `None` when the program is not an
    /// IRA-style base credit.
    pub fn bonus_for(incentive: &MatchedIncentive, flags: &BonusFlags) -> Option<IraBonusBreakdown> {
        let program = &incentive.program;
        if !Self::is_ira_base_credit(program) {
            return None;
        }

        let base = incentive.estimated_value;
        let rates = &program.bonus_rates;
        let addend = |enabled: bool, rate: f64| if enabled && rate > 0.0 { base * rate } else { 0.0 };

        let domestic = addend(flags.domestic_content, rates.domestic_content_rate());
        let community = addend(flags.energy_community, rates.energy_community_rate());
        let wage = addend(flags.prevailing_wage, rates.prevailing_wage_rate());
        let total = base + domestic + community + wage;

        let parts: Vec<String> = [
            ("domestic content bonus", domestic, rates.domestic_content_rate()),
            ("energy community bonus", community, rates.energy_community_rate()),
            ("prevailing wage bonus", wage, rates.prevailing_wage_rate()),
        ]
        .into_iter()
        .filter(|&(_, amount, _)| amount != 0.0)
        .map(|(label, amount, rate)| format!("{label} {} ({})", usd(amount), percent(rate)))
        .collect();

        let explanation = if parts.is_empty() {
            format!("Base credit {}; no bonus adders apply", usd(base))
        } else {
            format!(
                "Base credit {} + {} = {}",
                usd(base),
                parts.join(" + "),
                usd(total)
            )
        };

        Some(IraBonusBreakdown {
            program_id: program.id.clone(),
            program_name: program.name.clone(),
            base_value: base,
            domestic_content_bonus: domestic,
            energy_community_bonus: community,
            prevailing_wage_bonus: wage,
            total_with_bonuses: total,
            explanation,
        })
    }

    /// Whether a program is treated as an IRA-style base credit: its name
    /// cites a known federal credit section or the investment/production
    /// tax credit, or it carries a usable bonus-adder rate.
    pub fn is_ira_base_credit(program: &IncentiveProgram) -> bool {
        program.bonus_rates.has_any() || cites_credit_section(&program.name)
    }
}

fn cites_credit_section(name: &str) -> bool {
    let tokens = tokenize(&name.replace('§', " section "));

    if tokens.iter().any(|t| LETTERED_SECTIONS.contains(&t.as_str())) {
        return true;
    }

    let prefixed = tokens.windows(2).any(|w| {
        SECTION_PREFIXES.contains(&w[0].as_str()) && NUMERIC_SECTIONS.contains(&w[1].as_str())
    });
    if prefixed {
        return true;
    }

    CREDIT_PHRASES.iter().any(|phrase| {
        tokens
            .windows(phrase.len())
            .any(|w| w.iter().zip(phrase.iter()).all(|(t, p)| t == p))
    })
}
