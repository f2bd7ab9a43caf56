//! Side-by-side comparison of 2 to 5 mortgage options.
//!
//! Each option runs through the single-loan pipeline independently (in
//! parallel with the `parallel` feature); results are kept in input order
//! before best metrics and adjacent-pair differences are derived.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::identifiers::derive_id;
use crate::mortgage::summary::calculate_with_warnings;
use crate::mortgage::{MortgageCalculation, MortgageInput};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

pub const MIN_COMPARISON_INPUTS: usize = 2;
pub const MAX_COMPARISON_INPUTS: usize = 5;

const PERCENT_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Metric tracked across compared options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonMetric {
    MonthlyPayment,
    TotalInterest,
    TotalPayments,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 3] = [
        ComparisonMetric::MonthlyPayment,
        ComparisonMetric::TotalInterest,
        ComparisonMetric::TotalPayments,
    ];

    pub fn value(self, calculation: &MortgageCalculation) -> Money {
        match self {
            ComparisonMetric::MonthlyPayment => calculation.monthly_payment,
            ComparisonMetric::TotalInterest => calculation.total_interest,
            ComparisonMetric::TotalPayments => calculation.total_payments,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ComparisonMetric::MonthlyPayment => "Monthly Payment",
            ComparisonMetric::TotalInterest => "Total Interest",
            ComparisonMetric::TotalPayments => "Total Amount Paid",
        }
    }
}

/// Difference between two options for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDifference {
    pub metric: ComparisonMetric,
    /// 1-based position of the first option.
    pub mortgage_1: usize,
    /// 1-based position of the second option.
    pub mortgage_2: usize,
    pub value_1: Money,
    pub value_2: Money,
    /// `value_1 - value_2`.
    pub difference: Money,
    /// Difference relative to `value_1`, as a percentage; zero when `value_1` is zero.
    pub percentage_difference: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub best_monthly_payment: Money,
    pub best_total_interest: Money,
    pub differences: Vec<ComparisonDifference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageComparison {
    pub comparison_id: String,
    pub mortgages: Vec<MortgageCalculation>,
    pub comparison_summary: ComparisonSummary,
}

/// Request body for a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub mortgages: Vec<MortgageInput>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare 2 to 5 mortgage options.
pub fn compare(inputs: &[MortgageInput]) -> MortgageResult<MortgageComparison> {
    compare_with_warnings(inputs).map(|(comparison, _)| comparison)
}

/// Same as [`compare`], wrapped in the standard computation envelope.
pub fn analyze_comparison(
    input: &ComparisonInput,
) -> MortgageResult<ComputationOutput<MortgageComparison>> {
    let start = Instant::now();
    let (comparison, warnings) = compare_with_warnings(&input.mortgages)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage comparison over independently amortized options",
        input,
        warnings,
        elapsed,
        comparison,
    ))
}

/// Percentage difference of `value_2` against `value_1`, rounded to 2 dp.
pub fn percentage_difference(value_1: Money, value_2: Money) -> Percent {
    if value_1.is_zero() {
        return Decimal::ZERO;
    }
    ((value_1 - value_2) / value_1 * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn compare_with_warnings(
    inputs: &[MortgageInput],
) -> MortgageResult<(MortgageComparison, Vec<String>)> {
    if inputs.len() < MIN_COMPARISON_INPUTS {
        return Err(MortgageError::TooFewInputs {
            count: inputs.len(),
        });
    }
    if inputs.len() > MAX_COMPARISON_INPUTS {
        return Err(MortgageError::TooManyInputs {
            count: inputs.len(),
            max: MAX_COMPARISON_INPUTS,
        });
    }

    let _span = tracing::debug_span!("compare", options = inputs.len()).entered();

    let mut mortgages = Vec::with_capacity(inputs.len());
    let mut warnings = Vec::new();
    for (idx, outcome) in run_options(inputs).into_iter().enumerate() {
        let (calculation, option_warnings) =
            outcome.map_err(|e| MortgageError::ComparisonOption {
                index: idx + 1,
                source: Box::new(e),
            })?;
        warnings.extend(
            option_warnings
                .into_iter()
                .map(|w| format!("Option {}: {}", idx + 1, w)),
        );
        mortgages.push(calculation);
    }

    let comparison_summary = ComparisonSummary {
        best_monthly_payment: best(&mortgages, ComparisonMetric::MonthlyPayment),
        best_total_interest: best(&mortgages, ComparisonMetric::TotalInterest),
        differences: adjacent_differences(&mortgages),
    };

    let comparison = MortgageComparison {
        comparison_id: derive_id("cmp", &inputs)?,
        mortgages,
        comparison_summary,
    };
    Ok((comparison, warnings))
}

type OptionOutcome = MortgageResult<(MortgageCalculation, Vec<String>)>;

#[cfg(feature = "parallel")]
fn run_options(inputs: &[MortgageInput]) -> Vec<OptionOutcome> {
    use rayon::prelude::*;
    inputs.par_iter().map(calculate_with_warnings).collect()
}

#[cfg(not(feature = "parallel"))]
fn run_options(inputs: &[MortgageInput]) -> Vec<OptionOutcome> {
    inputs.iter().map(calculate_with_warnings).collect()
}

fn best(mortgages: &[MortgageCalculation], metric: ComparisonMetric) -> Money {
    mortgages
        .iter()
        .map(|m| metric.value(m))
        .min()
        .unwrap_or(Decimal::ZERO)
}

fn adjacent_differences(mortgages: &[MortgageCalculation]) -> Vec<ComparisonDifference> {
    mortgages
        .windows(2)
        .enumerate()
        .flat_map(|(idx, pair)| {
            ComparisonMetric::ALL.into_iter().map(move |metric| {
                let value_1 = metric.value(&pair[0]);
                let value_2 = metric.value(&pair[1]);
                ComparisonDifference {
                    metric,
                    mortgage_1: idx + 1,
                    mortgage_2: idx + 2,
                    value_1,
                    value_2,
                    difference: value_1 - value_2,
                    percentage_difference: percentage_difference(value_1, value_2),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_difference() {
        assert_eq!(percentage_difference(dec!(200), dec!(150)), dec!(25));
        assert_eq!(percentage_difference(dec!(150), dec!(200)), dec!(-33.33));
    }

    #[test]
    fn test_percentage_difference_zero_base() {
        assert_eq!(percentage_difference(Decimal::ZERO, dec!(10)), Decimal::ZERO);
    }

    #[test]
    fn test_cardinality_checked_before_work() {
        assert!(matches!(
            compare(&[]),
            Err(MortgageError::TooFewInputs { count: 0 })
        ));
    }

    #[test]
    fn test_metric_serde_names() {
        let json = serde_json::to_string(&ComparisonMetric::TotalPayments).unwrap();
        assert_eq!(json, "\"TOTAL_PAYMENTS\"");
    }
}
