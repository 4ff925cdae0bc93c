//! IRA bonus adders.
//!
//! For programs recognized as IRA-style base credits, computes the
//! additive domestic content, energy community and prevailing wage bonus
//! amounts from project-level eligibility flags. A category contributes
//! `base × rate` only when its flag is set and the program defines a
//! usable rate for it.
//!
//! Bonus computation is independent of stacking groups; breakdowns are
//! reported alongside them.

mod calculator;

pub use calculator::{BonusCalculator, BonusFlags, IraBonusBreakdown};
