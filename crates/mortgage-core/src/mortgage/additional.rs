//! Additional principal payment cadence.

use serde::{Deserialize, Serialize};

/// How often an additional principal payment is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdditionalPaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    Quarterly,
    SemiAnnually,
    Annually,
    OneTime,
}

impl AdditionalPaymentFrequency {
    /// Extra payments per year; zero for a one-time payment.
    pub fn payments_per_year(self) -> u32 {
        match self {
            AdditionalPaymentFrequency::Monthly => 12,
            AdditionalPaymentFrequency::BiWeekly => 26,
            AdditionalPaymentFrequency::Quarterly => 4,
            AdditionalPaymentFrequency::SemiAnnually => 2,
            AdditionalPaymentFrequency::Annually => 1,
            AdditionalPaymentFrequency::OneTime => 0,
        }
    }

    pub fn is_one_time(self) -> bool {
        self == AdditionalPaymentFrequency::OneTime
    }

    /// More extra payments per year than regular periods; at most one extra
    /// payment is posted per period, so some are dropped.
    pub fn is_finer_than(self, periods_per_year: u32) -> bool {
        self.payments_per_year() > periods_per_year
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AdditionalPaymentFrequency::Monthly => "Monthly",
            AdditionalPaymentFrequency::BiWeekly => "Bi-Weekly",
            AdditionalPaymentFrequency::Quarterly => "Quarterly",
            AdditionalPaymentFrequency::SemiAnnually => "Semi-Annually",
            AdditionalPaymentFrequency::Annually => "Annually",
            AdditionalPaymentFrequency::OneTime => "One-Time Payment",
        }
    }
}

/// Whether an additional principal payment falls in `period_index` (1-based).
///
/// A payment is due in the period containing each boundary
/// `k * periods_per_year / payments_per_year`. When the regular frequency is
/// a multiple of the extra one this is every `periods_per_year /
/// payments_per_year` periods.
pub fn applies_at(
    period_index: u32,
    frequency: AdditionalPaymentFrequency,
    periods_per_year: u32,
) -> bool {
    if period_index == 0 || periods_per_year == 0 {
        return false;
    }
    if frequency.is_one_time() {
        return period_index == 1;
    }
    let n = u64::from(frequency.payments_per_year());
    let ppy = u64::from(periods_per_year);
    let p = u64::from(period_index);
    (p * n) / ppy > ((p - 1) * n) / ppy
}
