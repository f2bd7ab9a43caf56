//! Schedule aggregation and the `calculate` entry point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::identifiers::derive_id;
use crate::mortgage::frequency::PaymentFrequency;
use crate::mortgage::input::MortgageInput;
use crate::mortgage::schedule::{generate_schedule, AmortizationEntry};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Denormalized display view of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub loan_amount: Money,
    pub total_interest_paid: Money,
    pub total_amount_paid: Money,
    pub monthly_payment: Money,
    /// Nominal annual rate, as a percentage.
    pub interest_rate: Percent,
    pub loan_term_years: u32,
    pub payment_frequency: PaymentFrequency,
}

/// Complete result of a mortgage calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageCalculation {
    pub calculation_id: String,
    /// Regular payment of the first period, whatever the payment frequency.
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// Sum of every amount paid, additional principal included.
    pub total_payments: Money,
    pub number_of_payments: u32,
    pub total_interest_saved: Money,
    pub amortization_schedule: Vec<AmortizationEntry>,
    pub summary: MortgageSummary,
}

/// Totals reduced from a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTotals {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payments: Money,
    pub total_interest_saved: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reduce a schedule to its totals.
pub fn aggregate(schedule: &[AmortizationEntry]) -> ScheduleTotals {
    ScheduleTotals {
        monthly_payment: schedule
            .first()
            .map(|e| e.regular_payment)
            .unwrap_or(Decimal::ZERO),
        total_interest: schedule.iter().map(|e| e.interest_payment).sum(),
        total_payments: schedule.iter().map(|e| e.total_payment).sum(),
        total_interest_saved: schedule
            .last()
            .map(|e| e.interest_saved)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Validate the input, generate its schedule and aggregate it.
pub fn calculate(input: &MortgageInput) -> MortgageResult<MortgageCalculation> {
    calculate_with_warnings(input).map(|(calculation, _)| calculation)
}

/// Same as [`calculate`], wrapped in the standard computation envelope.
pub fn analyze_mortgage(
    input: &MortgageInput,
) -> MortgageResult<ComputationOutput<MortgageCalculation>> {
    let start = Instant::now();
    let (calculation, warnings) = calculate_with_warnings(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization with buydown steps and additional principal",
        input,
        warnings,
        elapsed,
        calculation,
    ))
}

pub(crate) fn calculate_with_warnings(
    input: &MortgageInput,
) -> MortgageResult<(MortgageCalculation, Vec<String>)> {
    let _span = tracing::debug_span!(
        "calculate",
        loan_amount = %input.loan_amount,
        rate = %input.interest_rate,
        term = input.loan_term_years
    )
    .entered();

    input.validate()?;
    let generated = generate_schedule(input)?;
    let totals = aggregate(&generated.entries);

    let summary = MortgageSummary {
        loan_amount: input.loan_amount,
        total_interest_paid: totals.total_interest,
        total_amount_paid: totals.total_payments,
        monthly_payment: totals.monthly_payment,
        interest_rate: input.interest_rate,
        loan_term_years: input.loan_term_years,
        payment_frequency: input.payment_frequency,
    };

    tracing::debug!(
        payments = generated.entries.len(),
        total_interest = %totals.total_interest,
        "schedule generated"
    );

    let calculation = MortgageCalculation {
        calculation_id: derive_id("calc", input)?,
        monthly_payment: totals.monthly_payment,
        total_interest: totals.total_interest,
        total_payments: totals.total_payments,
        number_of_payments: generated.entries.len() as u32,
        total_interest_saved: totals.total_interest_saved,
        amortization_schedule: generated.entries,
        summary,
    };

    Ok((calculation, generated.warnings))
}
