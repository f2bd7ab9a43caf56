use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::MortgageError;
use crate::types::{round_currency, Money, Rate};
use crate::MortgageResult;

/// Payment (PMT), Excel sign convention: a positive present value yields a
/// negative payment.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(-(present_value + future_value) / Decimal::from(nper));
    }

    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r
        .checked_powu(u64::from(nper))
        .ok_or_else(|| MortgageError::invalid("nper", "Compounding factor overflows"))?;
    let annuity_factor = (factor - Decimal::ONE) / rate;

    if annuity_factor.is_zero() {
        return Err(MortgageError::invalid(
            "rate",
            "Annuity factor is zero",
        ));
    }

    Ok(-(present_value * factor + future_value) / annuity_factor)
}

/// Level annuity payment for a fully amortizing loan, rounded to cents.
pub fn level_payment(principal: Money, period_rate: Rate, periods: u32) -> MortgageResult<Money> {
    let payment = pmt(period_rate, periods, principal, Decimal::ZERO)?;
    Ok(round_currency(-payment))
}
