use chrono::NaiveDate;
use mortgage_core::mortgage::rates::BuydownType;
use mortgage_core::mortgage::{
    analyze_mortgage, calculate, AdditionalPaymentFrequency, MortgageInput, MortgageType,
    PaymentFrequency,
};
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn fixed_monthly(amount: Decimal, rate: Decimal, years: u32) -> MortgageInput {
    MortgageInput {
        loan_amount: amount,
        interest_rate: rate,
        loan_term_years: years,
        down_payment: None,
        property_value: None,
        mortgage_type: MortgageType::Fixed,
        payment_frequency: PaymentFrequency::Monthly,
        buydown_type: None,
        additional_principal_payment: None,
        additional_payment_frequency: None,
        first_payment_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
    }
}

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

// ===========================================================================
// Reference loan
// ===========================================================================

#[test]
fn test_reference_loan_200k_6pct_30y() {
    let calc = calculate(&fixed_monthly(dec!(200_000), dec!(6), 30)).unwrap();

    assert_eq!(calc.monthly_payment, dec!(1199.10));
    assert_eq!(calc.amortization_schedule.len(), 360);
    assert_eq!(
        calc.amortization_schedule.last().unwrap().remaining_balance,
        Decimal::ZERO
    );
    // 360 * 1199.10 - 200000 = 231676; the final payment absorbs the rounding drift
    assert_close(calc.total_interest, dec!(231_676.38), dec!(5), "total interest");
}

#[test]
fn test_principal_sums_to_loan_without_extras() {
    for frequency in [
        PaymentFrequency::Monthly,
        PaymentFrequency::BiWeekly,
        PaymentFrequency::Weekly,
    ] {
        let mut input = fixed_monthly(dec!(275_000), dec!(5.125), 20);
        input.payment_frequency = frequency;
        let calc = calculate(&input).unwrap();
        let principal: Decimal = calc
            .amortization_schedule
            .iter()
            .map(|e| e.principal_payment)
            .sum();
        assert_eq!(principal, dec!(275_000), "{:?}", frequency);
        assert_eq!(
            calc.amortization_schedule.len() as u32,
            20 * frequency.periods_per_year()
        );
        assert_eq!(
            calc.amortization_schedule.last().unwrap().remaining_balance,
            Decimal::ZERO
        );
    }
}

#[test]
fn test_total_interest_equals_payments_less_principal() {
    let mut inputs = vec![
        fixed_monthly(dec!(200_000), dec!(6), 30),
        fixed_monthly(dec!(90_000), dec!(3.4), 10),
    ];
    let mut io = fixed_monthly(dec!(500_000), dec!(7), 25);
    io.mortgage_type = MortgageType::InterestOnly;
    inputs.push(io);
    let mut accelerated = fixed_monthly(dec!(300_000), dec!(6), 30);
    accelerated.buydown_type = Some(BuydownType::TwoOne);
    accelerated.additional_principal_payment = Some(dec!(500));
    accelerated.additional_payment_frequency = Some(AdditionalPaymentFrequency::Quarterly);
    inputs.push(accelerated);

    for input in &inputs {
        let calc = calculate(input).unwrap();
        assert_eq!(
            calc.total_interest,
            calc.total_payments - input.loan_amount,
            "{:?}",
            input
        );
    }
}

#[test]
fn test_calculate_is_idempotent() {
    let mut input = fixed_monthly(dec!(320_000), dec!(6.75), 30);
    input.buydown_type = Some(BuydownType::ThreeTwoOne);
    input.additional_principal_payment = Some(dec!(250));
    input.additional_payment_frequency = Some(AdditionalPaymentFrequency::BiWeekly);

    let first = calculate(&input).unwrap();
    let second = calculate(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ===========================================================================
// Buydowns
// ===========================================================================

#[test]
fn test_two_one_buydown_rates_by_year() {
    let mut input = fixed_monthly(dec!(300_000), dec!(6), 30);
    input.buydown_type = Some(BuydownType::TwoOne);
    let calc = calculate(&input).unwrap();
    let schedule = &calc.amortization_schedule;

    assert!(schedule[..12].iter().all(|e| e.interest_rate == dec!(4)));
    assert!(schedule[12..24].iter().all(|e| e.interest_rate == dec!(5)));
    assert!(schedule[24..].iter().all(|e| e.interest_rate == dec!(6)));
    assert_eq!(calc.summary.interest_rate, dec!(6));
}

#[test]
fn test_buydown_lowers_first_payment() {
    let plain = calculate(&fixed_monthly(dec!(300_000), dec!(6), 30)).unwrap();
    let mut input = fixed_monthly(dec!(300_000), dec!(6), 30);
    input.buydown_type = Some(BuydownType::ThreeTwoOne);
    let bought_down = calculate(&input).unwrap();

    assert!(bought_down.monthly_payment < plain.monthly_payment);
    assert!(bought_down.total_interest < plain.total_interest);
}

#[test]
fn test_two_one_buydown_without_extras_pays_off_early() {
    let mut input = fixed_monthly(dec!(200_000), dec!(6), 30);
    input.buydown_type = Some(BuydownType::TwoOne);
    let calc = calculate(&input).unwrap();

    assert_eq!(calc.number_of_payments, 354);
    assert_eq!(calc.amortization_schedule.len(), 354);
    assert_eq!(calc.total_interest_saved, Decimal::ZERO);
    assert_eq!(
        calc.amortization_schedule.last().unwrap().remaining_balance,
        Decimal::ZERO
    );
}

#[test]
fn test_buydown_clamp_is_flagged() {
    let mut input = fixed_monthly(dec!(150_000), dec!(2), 15);
    input.buydown_type = Some(BuydownType::ThreeTwoOne);
    let out = analyze_mortgage(&input).unwrap();

    assert_eq!(out.result.amortization_schedule[0].interest_rate, Decimal::ZERO);
    // Year 1 (-3%) clamps; year 2 (-2%) lands exactly on zero.
    assert_eq!(out.result.amortization_schedule[12].interest_rate, Decimal::ZERO);
    assert_eq!(out.result.amortization_schedule[24].interest_rate, dec!(1));
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("clamped"));
}

// ===========================================================================
// Additional payments
// ===========================================================================

#[test]
fn test_monthly_extra_shortens_schedule() {
    let baseline = calculate(&fixed_monthly(dec!(300_000), dec!(6), 30)).unwrap();
    let mut input = fixed_monthly(dec!(300_000), dec!(6), 30);
    input.additional_principal_payment = Some(dec!(200));
    input.additional_payment_frequency = Some(AdditionalPaymentFrequency::Monthly);
    let calc = calculate(&input).unwrap();

    assert!(calc.amortization_schedule.len() < 360);
    assert!(calc.total_interest < baseline.total_interest);
    assert_eq!(
        calc.total_interest_saved,
        baseline.total_interest - calc.total_interest
    );
    assert_eq!(
        calc.amortization_schedule.last().unwrap().remaining_balance,
        Decimal::ZERO
    );
}

#[test]
fn test_extra_frequency_defaults_to_monthly() {
    let mut explicit = fixed_monthly(dec!(300_000), dec!(6), 30);
    explicit.additional_principal_payment = Some(dec!(200));
    explicit.additional_payment_frequency = Some(AdditionalPaymentFrequency::Monthly);
    let mut implicit = explicit.clone();
    implicit.additional_payment_frequency = None;

    let a = calculate(&explicit).unwrap();
    let b = calculate(&implicit).unwrap();
    assert_eq!(a.amortization_schedule, b.amortization_schedule);
}

#[test]
fn test_annual_extra_on_bi_weekly_loan() {
    let mut input = fixed_monthly(dec!(250_000), dec!(5.5), 30);
    input.payment_frequency = PaymentFrequency::BiWeekly;
    input.additional_principal_payment = Some(dec!(1_000));
    input.additional_payment_frequency = Some(AdditionalPaymentFrequency::Annually);
    let calc = calculate(&input).unwrap();

    let extra_periods: Vec<u32> = calc
        .amortization_schedule
        .iter()
        .filter(|e| !e.additional_principal_payment.is_zero())
        .map(|e| e.payment_number)
        .take(3)
        .collect();
    assert_eq!(extra_periods, vec![26, 52, 78]);
}

#[test]
fn test_interest_only_with_extras_reduces_interest() {
    let mut input = fixed_monthly(dec!(200_000), dec!(6), 10);
    input.mortgage_type = MortgageType::InterestOnly;
    let plain = calculate(&input).unwrap();
    input.additional_principal_payment = Some(dec!(1_000));
    let out = analyze_mortgage(&input).unwrap();

    assert_eq!(plain.monthly_payment, dec!(1000));
    assert!(out.result.total_interest < plain.total_interest);
    assert!(!out.warnings.is_empty());
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn test_validation_error_names_field() {
    let mut input = fixed_monthly(dec!(200_000), dec!(6), 30);
    input.down_payment = Some(dec!(300_000));
    input.property_value = Some(dec!(250_000));
    match calculate(&input) {
        Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, "down_payment"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_non_amortizing_loan_rejected() {
    let input = fixed_monthly(dec!(10_000), dec!(30), 50);
    let err = calculate(&input).unwrap_err();
    assert!(matches!(
        err,
        MortgageError::NonAmortizingLoan { period: 1, .. }
    ));
    assert!(err.to_string().contains("250.00"));
}

#[test]
fn test_error_messages_are_readable() {
    let mut input = fixed_monthly(dec!(200_000), dec!(6), 30);
    input.interest_rate = Decimal::ZERO;
    let err = calculate(&input).unwrap_err();
    assert!(err.to_string().starts_with("Invalid input: interest_rate"));
}
