use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Non-amortizing loan: payment {payment} does not exceed interest {interest} in period {period}")]
    NonAmortizingLoan {
        period: u32,
        payment: Decimal,
        interest: Decimal,
    },

    #[error("Too few inputs: comparison needs at least 2 mortgages, got {count}")]
    TooFewInputs { count: usize },

    #[error("Too many inputs: comparison accepts at most {max} mortgages, got {count}")]
    TooManyInputs { count: usize, max: usize },

    #[error("Mortgage option {index}: {source}")]
    ComparisonOption {
        index: usize,
        #[source]
        source: Box<MortgageError>,
    },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
