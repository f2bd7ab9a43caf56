use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::mortgage::additional::AdditionalPaymentFrequency;
use crate::mortgage::frequency::PaymentFrequency;
use crate::mortgage::rates::BuydownType;
use crate::types::{Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Validation bounds
// ---------------------------------------------------------------------------

const MIN_LOAN_AMOUNT: Money = dec!(1_000);
const MAX_LOAN_AMOUNT: Money = dec!(10_000_000);
const MIN_INTEREST_RATE: Percent = dec!(0.1);
const MAX_INTEREST_RATE: Percent = dec!(30);
const MAX_TERM_YEARS: u32 = 50;

/// Allowed gap between the loan amount and property value less down payment.
const LOAN_TO_EQUITY_TOLERANCE: Money = dec!(100);

/// Mortgage product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MortgageType {
    Fixed,
    Variable,
    InterestOnly,
}

impl MortgageType {
    pub fn display_name(self) -> &'static str {
        match self {
            MortgageType::Fixed => "Fixed Rate Mortgage",
            MortgageType::Variable => "Variable Rate Mortgage",
            MortgageType::InterestOnly => "Interest Only Mortgage",
        }
    }
}

/// Mortgage calculation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Amount borrowed.
    pub loan_amount: Money,
    /// Annual nominal interest rate as a percentage (6.5 = 6.5%).
    pub interest_rate: Percent,
    pub loan_term_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Money>,
    pub mortgage_type: MortgageType,
    pub payment_frequency: PaymentFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buydown_type: Option<BuydownType>,
    /// Extra principal paid on each additional-payment date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_principal_payment: Option<Money>,
    /// Defaults to monthly when an additional amount is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_payment_frequency: Option<AdditionalPaymentFrequency>,
    /// Date of the first scheduled payment.
    pub first_payment_date: NaiveDate,
}

impl MortgageInput {
    pub fn buydown(&self) -> BuydownType {
        self.buydown_type.unwrap_or_default()
    }

    /// Configured extra principal, zero when absent.
    pub fn additional_amount(&self) -> Money {
        self.additional_principal_payment.unwrap_or(Decimal::ZERO)
    }

    pub fn additional_frequency(&self) -> AdditionalPaymentFrequency {
        self.additional_payment_frequency.unwrap_or_default()
    }

    /// Reject malformed input before any computation starts.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.loan_amount <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "loan_amount",
                "Loan amount must be positive",
            ));
        }
        if self.loan_amount < MIN_LOAN_AMOUNT || self.loan_amount > MAX_LOAN_AMOUNT {
            return Err(MortgageError::invalid(
                "loan_amount",
                format!("Loan amount must be between {MIN_LOAN_AMOUNT} and {MAX_LOAN_AMOUNT}"),
            ));
        }
        if self.interest_rate <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "interest_rate",
                "Interest rate must be positive",
            ));
        }
        if self.interest_rate < MIN_INTEREST_RATE || self.interest_rate > MAX_INTEREST_RATE {
            return Err(MortgageError::invalid(
                "interest_rate",
                format!("Interest rate must be between {MIN_INTEREST_RATE}% and {MAX_INTEREST_RATE}%"),
            ));
        }
        if self.loan_term_years == 0 {
            return Err(MortgageError::invalid(
                "loan_term_years",
                "Loan term must be at least 1 year",
            ));
        }
        if self.loan_term_years > MAX_TERM_YEARS {
            return Err(MortgageError::invalid(
                "loan_term_years",
                format!("Loan term cannot exceed {MAX_TERM_YEARS} years"),
            ));
        }
        if let Some(down) = self.down_payment {
            if down < Decimal::ZERO {
                return Err(MortgageError::invalid(
                    "down_payment",
                    "Down payment cannot be negative",
                ));
            }
        }
        if let Some(value) = self.property_value {
            if value < Decimal::ZERO {
                return Err(MortgageError::invalid(
                    "property_value",
                    "Property value cannot be negative",
                ));
            }
            let down = self.down_payment.unwrap_or(Decimal::ZERO);
            if down > value {
                return Err(MortgageError::invalid(
                    "down_payment",
                    "Down payment cannot be greater than property value",
                ));
            }
            if (self.loan_amount - (value - down)).abs() > LOAN_TO_EQUITY_TOLERANCE {
                return Err(MortgageError::invalid(
                    "loan_amount",
                    "Loan amount should equal property value minus down payment",
                ));
            }
        }
        if self.additional_amount() < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "additional_principal_payment",
                "Additional principal payment cannot be negative",
            ));
        }
        Ok(())
    }
}
