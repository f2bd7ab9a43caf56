//! Single-loan pipeline: rate resolution, frequency conversion, additional
//! payment cadence, schedule generation and aggregation.

pub mod additional;
pub mod frequency;
pub mod input;
pub mod rates;
pub mod schedule;
pub mod summary;

pub use additional::AdditionalPaymentFrequency;
pub use frequency::PaymentFrequency;
pub use input::{MortgageInput, MortgageType};
pub use rates::BuydownType;
pub use schedule::AmortizationEntry;
pub use summary::{analyze_mortgage, calculate, MortgageCalculation, MortgageSummary};
