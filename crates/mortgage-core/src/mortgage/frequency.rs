//! Payment frequency conversion: periods per year, per-period rates and the
//! payment calendar.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{percent_to_rate, Percent, Rate};
use crate::MortgageResult;

/// How often regular payments are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFrequency {
    Monthly,
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::BiWeekly => "Bi-Weekly",
            PaymentFrequency::Weekly => "Weekly",
        }
    }
}

/// Number of scheduled periods over the full term.
pub fn total_periods(term_years: u32, frequency: PaymentFrequency) -> u32 {
    term_years * frequency.periods_per_year()
}

/// Per-period rate from an annual nominal percentage.
///
/// Simple division by the number of periods per year (nominal, not
/// effective, compounding).
pub fn period_rate(annual_percent: Percent, frequency: PaymentFrequency) -> Rate {
    percent_to_rate(annual_percent) / Decimal::from(frequency.periods_per_year())
}

/// Calendar date of `period_index` (1-based), anchored on the first payment.
pub fn payment_date(
    first_payment_date: NaiveDate,
    frequency: PaymentFrequency,
    period_index: u32,
) -> MortgageResult<NaiveDate> {
    let offset = period_index.saturating_sub(1);
    let date = match frequency {
        PaymentFrequency::Monthly => first_payment_date.checked_add_months(Months::new(offset)),
        PaymentFrequency::BiWeekly => {
            first_payment_date.checked_add_days(Days::new(u64::from(offset) * 14))
        }
        PaymentFrequency::Weekly => {
            first_payment_date.checked_add_days(Days::new(u64::from(offset) * 7))
        }
    };
    date.ok_or_else(|| {
        MortgageError::DateError(format!(
            "payment {period_index} after {first_payment_date} is out of range"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PaymentFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(PaymentFrequency::BiWeekly.periods_per_year(), 26);
        assert_eq!(PaymentFrequency::Weekly.periods_per_year(), 52);
    }

    #[test]
    fn test_total_periods() {
        assert_eq!(total_periods(30, PaymentFrequency::Monthly), 360);
        assert_eq!(total_periods(15, PaymentFrequency::BiWeekly), 390);
        assert_eq!(total_periods(1, PaymentFrequency::Weekly), 52);
    }

    #[test]
    fn test_period_rate_is_nominal_division() {
        assert_eq!(period_rate(dec!(6), PaymentFrequency::Monthly), dec!(0.005));
        assert_eq!(period_rate(dec!(5.2), PaymentFrequency::Weekly), dec!(0.001));
    }

    #[test]
    fn test_monthly_dates_clamp_to_month_end() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let feb = payment_date(start, PaymentFrequency::Monthly, 2).unwrap();
        assert_eq!(feb, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        let mar = payment_date(start, PaymentFrequency::Monthly, 3).unwrap();
        assert_eq!(mar, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_bi_weekly_dates() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(payment_date(start, PaymentFrequency::BiWeekly, 1).unwrap(), start);
        assert_eq!(
            payment_date(start, PaymentFrequency::BiWeekly, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 29).unwrap()
        );
    }

    #[test]
    fn test_display_names_match_additional_frequencies() {
        use crate::mortgage::additional::AdditionalPaymentFrequency;
        assert_eq!(
            PaymentFrequency::BiWeekly.display_name(),
            AdditionalPaymentFrequency::BiWeekly.display_name()
        );
        assert_eq!(
            PaymentFrequency::Monthly.display_name(),
            AdditionalPaymentFrequency::Monthly.display_name()
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PaymentFrequency::BiWeekly).unwrap();
        assert_eq!(json, "\"BI_WEEKLY\"");
    }
}
