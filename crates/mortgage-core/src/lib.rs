pub mod error;
pub mod identifiers;
pub mod mortgage;
pub mod time_value;
pub mod types;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::MortgageError;
pub use mortgage::{calculate, MortgageCalculation, MortgageInput};
pub use types::*;

#[cfg(feature = "comparison")]
pub use comparison::{compare, MortgageComparison};

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
