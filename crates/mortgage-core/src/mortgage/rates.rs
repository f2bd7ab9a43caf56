//! Buydown rate schedules.
//!
//! A buydown lowers the note rate by a fixed number of percentage points per
//! year for the first two or three years of the loan. Reduced rates never go
//! below zero: they are clamped and flagged instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

const TWO_ONE_STEPS: [Percent; 2] = [dec!(2), dec!(1)];
const THREE_TWO_ONE_STEPS: [Percent; 3] = [dec!(3), dec!(2), dec!(1)];

/// Temporary rate buydown variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuydownType {
    #[default]
    None,
    TwoOne,
    ThreeTwoOne,
}

impl BuydownType {
    /// Rate reduction (percentage points) for each buydown year.
    pub fn steps(self) -> &'static [Percent] {
        match self {
            BuydownType::None => &[],
            BuydownType::TwoOne => &TWO_ONE_STEPS,
            BuydownType::ThreeTwoOne => &THREE_TWO_ONE_STEPS,
        }
    }

    pub fn buydown_years(self) -> u32 {
        self.steps().len() as u32
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BuydownType::None => "No Buydown",
            BuydownType::TwoOne => "2-1 Buydown",
            BuydownType::ThreeTwoOne => "3-2-1 Buydown",
        }
    }
}

/// Annual rate in effect for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveRate {
    pub annual_rate: Percent,
    /// The buydown reduction exceeded the base rate and was clamped to zero.
    pub clamped: bool,
}

/// Loan year (1-based) a period falls in.
pub fn loan_year(period_index: u32, periods_per_year: u32) -> u32 {
    period_index.saturating_sub(1) / periods_per_year.max(1) + 1
}

/// Rate for a given buydown year (1-based).
pub fn rate_for_year(base_annual_rate: Percent, buydown: BuydownType, year: u32) -> EffectiveRate {
    let reduction = buydown
        .steps()
        .get(year.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(Decimal::ZERO);
    let reduced = base_annual_rate - reduction;
    if reduced < Decimal::ZERO {
        EffectiveRate {
            annual_rate: Decimal::ZERO,
            clamped: true,
        }
    } else {
        EffectiveRate {
            annual_rate: reduced,
            clamped: false,
        }
    }
}

/// Annual rate in effect for `period_index` (1-based).
pub fn effective_rate(
    base_annual_rate: Percent,
    buydown: BuydownType,
    period_index: u32,
    periods_per_year: u32,
) -> EffectiveRate {
    rate_for_year(
        base_annual_rate,
        buydown,
        loan_year(period_index, periods_per_year),
    )
}
