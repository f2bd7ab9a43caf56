//! Amortization schedule generation.
//!
//! Walks the loan period by period from `(loan_amount, 1, 0)` until the
//! balance reaches zero or the nominal term ends. Each period resolves the
//! buydown-adjusted rate, posts interest, the regular principal dictated by
//! the mortgage type and any additional principal due that period.
//!
//! Interest saved is measured against a baseline run of the same loan with
//! no additional payments, generated once up front.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::mortgage::additional::{self, AdditionalPaymentFrequency};
use crate::mortgage::frequency::{self, PaymentFrequency};
use crate::mortgage::input::{MortgageInput, MortgageType};
use crate::mortgage::rates::{self, BuydownType, EffectiveRate};
use crate::time_value::level_payment;
use crate::types::{round_currency, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One payment period of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based period index.
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub additional_principal_payment: Money,
    /// Interest plus regular principal.
    pub regular_payment: Money,
    /// Regular payment plus additional principal.
    pub total_payment: Money,
    pub remaining_balance: Money,
    /// Annual rate applied this period, as a percentage.
    pub interest_rate: Percent,
    /// Cumulative interest avoided versus the no-extra-payment baseline.
    pub interest_saved: Money,
}

/// A generated schedule plus the warnings raised while producing it.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    pub entries: Vec<AmortizationEntry>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Schedule plan
// ---------------------------------------------------------------------------

/// How regular principal is posted; resolved once per schedule.
#[derive(Debug, Clone)]
enum PostingRule {
    /// Level payments: one per buydown year, then the permanent payment.
    /// Each step amortizes the original principal over the full term rather
    /// than re-pricing the running balance, so buydown loans retire a few
    /// periods before the nominal term.
    Amortizing {
        buydown_payments: Vec<Money>,
        permanent_payment: Money,
    },
    /// Interest only, full balance due in the last nominal period.
    InterestOnly,
}

impl PostingRule {
    fn level_payment_for_year(buydown_payments: &[Money], permanent: Money, year: u32) -> Money {
        buydown_payments
            .get(year.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(permanent)
    }
}

/// Everything about the loan that stays fixed across periods.
#[derive(Debug, Clone)]
struct SchedulePlan {
    loan_amount: Money,
    base_rate: Percent,
    buydown: BuydownType,
    frequency: PaymentFrequency,
    periods_per_year: u32,
    total_periods: u32,
    rule: PostingRule,
    additional_amount: Money,
    additional_frequency: AdditionalPaymentFrequency,
}

impl SchedulePlan {
    fn new(input: &MortgageInput) -> MortgageResult<Self> {
        let frequency = input.payment_frequency;
        let periods_per_year = frequency.periods_per_year();
        let total_periods = frequency::total_periods(input.loan_term_years, frequency);
        let buydown = input.buydown();

        let rule = match input.mortgage_type {
            MortgageType::Fixed | MortgageType::Variable => {
                let amortize = |annual: Percent| {
                    level_payment(
                        input.loan_amount,
                        frequency::period_rate(annual, frequency),
                        total_periods,
                    )
                };
                let buydown_payments = (1..=buydown.buydown_years())
                    .map(|year| {
                        amortize(rates::rate_for_year(input.interest_rate, buydown, year).annual_rate)
                    })
                    .collect::<MortgageResult<Vec<_>>>()?;
                PostingRule::Amortizing {
                    buydown_payments,
                    permanent_payment: amortize(input.interest_rate)?,
                }
            }
            MortgageType::InterestOnly => PostingRule::InterestOnly,
        };

        Ok(SchedulePlan {
            loan_amount: input.loan_amount,
            base_rate: input.interest_rate,
            buydown,
            frequency,
            periods_per_year,
            total_periods,
            rule,
            additional_amount: input.additional_amount(),
            additional_frequency: input.additional_frequency(),
        })
    }

    fn has_additional_payments(&self) -> bool {
        self.additional_amount > Decimal::ZERO
    }

    fn rate_for_period(&self, period: u32) -> EffectiveRate {
        rates::effective_rate(self.base_rate, self.buydown, period, self.periods_per_year)
    }
}

/// A single posted period before dates and savings are attached.
#[derive(Debug, Clone)]
struct Posting {
    period: u32,
    annual_rate: Percent,
    interest: Money,
    principal: Money,
    additional: Money,
    balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the amortization schedule for a validated input.
pub fn generate_schedule(input: &MortgageInput) -> MortgageResult<GeneratedSchedule> {
    let plan = SchedulePlan::new(input)?;
    let warnings = plan_warnings(&plan);

    let postings = post_periods(&plan, plan.has_additional_payments())?;
    let baseline_interest: Vec<Money> = if plan.has_additional_payments() {
        post_periods(&plan, false)?
            .iter()
            .map(|p| p.interest)
            .collect()
    } else {
        postings.iter().map(|p| p.interest).collect()
    };

    if postings.len() < plan.total_periods as usize {
        tracing::debug!(
            periods = postings.len(),
            nominal = plan.total_periods,
            "loan paid off ahead of term"
        );
    }

    let mut entries = Vec::with_capacity(postings.len());
    let mut interest_saved = Decimal::ZERO;
    let last_index = postings.len().saturating_sub(1);

    for (idx, posting) in postings.iter().enumerate() {
        let baseline = baseline_interest.get(idx).copied().unwrap_or(Decimal::ZERO);
        interest_saved += baseline - posting.interest;
        if idx == last_index {
            // Baseline periods the accelerated loan never reached.
            interest_saved += baseline_interest.iter().skip(idx + 1).sum::<Money>();
        }

        let regular_payment = posting.interest + posting.principal;
        entries.push(AmortizationEntry {
            payment_number: posting.period,
            payment_date: frequency::payment_date(
                input.first_payment_date,
                plan.frequency,
                posting.period,
            )?,
            principal_payment: posting.principal,
            interest_payment: posting.interest,
            additional_principal_payment: posting.additional,
            regular_payment,
            total_payment: regular_payment + posting.additional,
            remaining_balance: posting.balance,
            interest_rate: posting.annual_rate,
            interest_saved,
        });
    }

    Ok(GeneratedSchedule { entries, warnings })
}

// ---------------------------------------------------------------------------
// Period posting
// ---------------------------------------------------------------------------

fn post_periods(plan: &SchedulePlan, with_additional: bool) -> MortgageResult<Vec<Posting>> {
    let mut postings = Vec::with_capacity(plan.total_periods as usize);
    let mut balance = plan.loan_amount;
    let mut period = 1;

    while period <= plan.total_periods && balance > Decimal::ZERO {
        let rate = plan.rate_for_period(period);
        let period_rate = frequency::period_rate(rate.annual_rate, plan.frequency);
        let interest = round_currency(balance * period_rate);
        let is_last = period == plan.total_periods;

        let principal = match &plan.rule {
            PostingRule::Amortizing {
                buydown_payments,
                permanent_payment,
            } => {
                let payment = PostingRule::level_payment_for_year(
                    buydown_payments,
                    *permanent_payment,
                    rates::loan_year(period, plan.periods_per_year),
                );
                if is_last {
                    balance
                } else if payment <= interest {
                    return Err(MortgageError::NonAmortizingLoan {
                        period,
                        payment,
                        interest,
                    });
                } else {
                    (payment - interest).min(balance)
                }
            }
            PostingRule::InterestOnly => {
                if is_last {
                    balance
                } else {
                    Decimal::ZERO
                }
            }
        };

        let additional = if with_additional
            && additional::applies_at(period, plan.additional_frequency, plan.periods_per_year)
        {
            plan.additional_amount
                .min(balance - principal)
                .max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        balance -= principal + additional;
        postings.push(Posting {
            period,
            annual_rate: rate.annual_rate,
            interest,
            principal,
            additional,
            balance,
        });
        period += 1;
    }

    Ok(postings)
}

fn plan_warnings(plan: &SchedulePlan) -> Vec<String> {
    let mut warnings = Vec::new();

    for year in 1..=plan.buydown.buydown_years() {
        if rates::rate_for_year(plan.base_rate, plan.buydown, year).clamped {
            tracing::warn!(
                year,
                base_rate = %plan.base_rate,
                buydown = plan.buydown.display_name(),
                "buydown rate clamped to zero"
            );
            warnings.push(format!(
                "{} reduction exceeds the {}% base rate in year {}; rate clamped to 0%",
                plan.buydown.display_name(),
                plan.base_rate,
                year
            ));
        }
    }

    if plan.has_additional_payments()
        && plan.additional_frequency.is_finer_than(plan.periods_per_year)
    {
        tracing::warn!(
            additional = plan.additional_frequency.display_name(),
            regular = plan.frequency.display_name(),
            "additional payments capped at one per period"
        );
        warnings.push(format!(
            "{} additional payments are more frequent than {} regular payments; \
             at most one additional payment is applied per period",
            plan.additional_frequency.display_name(),
            plan.frequency.display_name()
        ));
    }

    if plan.has_additional_payments() && matches!(plan.rule, PostingRule::InterestOnly) {
        warnings.push("Additional principal on an interest-only loan lowers interest but not the regular payment".into());
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
