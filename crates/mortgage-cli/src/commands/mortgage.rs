use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::comparison::{self, ComparisonInput};
use mortgage_core::mortgage::{
    self, AdditionalPaymentFrequency, BuydownType, MortgageInput, MortgageType, PaymentFrequency,
};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Fixed,
    Variable,
    InterestOnly,
}

impl From<TypeArg> for MortgageType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Fixed => MortgageType::Fixed,
            TypeArg::Variable => MortgageType::Variable,
            TypeArg::InterestOnly => MortgageType::InterestOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    BiWeekly,
    Weekly,
}

impl From<FrequencyArg> for PaymentFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => PaymentFrequency::Monthly,
            FrequencyArg::BiWeekly => PaymentFrequency::BiWeekly,
            FrequencyArg::Weekly => PaymentFrequency::Weekly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BuydownArg {
    None,
    TwoOne,
    ThreeTwoOne,
}

impl From<BuydownArg> for BuydownType {
    fn from(arg: BuydownArg) -> Self {
        match arg {
            BuydownArg::None => BuydownType::None,
            BuydownArg::TwoOne => BuydownType::TwoOne,
            BuydownArg::ThreeTwoOne => BuydownType::ThreeTwoOne,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExtraFrequencyArg {
    Monthly,
    BiWeekly,
    Quarterly,
    SemiAnnually,
    Annually,
    OneTime,
}

impl From<ExtraFrequencyArg> for AdditionalPaymentFrequency {
    fn from(arg: ExtraFrequencyArg) -> Self {
        match arg {
            ExtraFrequencyArg::Monthly => AdditionalPaymentFrequency::Monthly,
            ExtraFrequencyArg::BiWeekly => AdditionalPaymentFrequency::BiWeekly,
            ExtraFrequencyArg::Quarterly => AdditionalPaymentFrequency::Quarterly,
            ExtraFrequencyArg::SemiAnnually => AdditionalPaymentFrequency::SemiAnnually,
            ExtraFrequencyArg::Annually => AdditionalPaymentFrequency::Annually,
            ExtraFrequencyArg::OneTime => AdditionalPaymentFrequency::OneTime,
        }
    }
}

/// Arguments for a single mortgage calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 6.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    #[arg(long, value_enum, default_value = "fixed")]
    pub mortgage_type: TypeArg,

    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: FrequencyArg,

    #[arg(long, value_enum)]
    pub buydown: Option<BuydownArg>,

    /// Additional principal paid on each extra-payment date
    #[arg(long)]
    pub extra_payment: Option<Decimal>,

    #[arg(long, value_enum)]
    pub extra_frequency: Option<ExtraFrequencyArg>,

    #[arg(long)]
    pub down_payment: Option<Decimal>,

    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// First payment date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

/// Arguments for a mortgage comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON file holding {"mortgages": [...]}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let request = if args.input.is_none() && args.loan_amount.is_some() {
        None
    } else {
        input::load_request(args.input.as_deref())?
    };
    let mortgage_input: MortgageInput = match request {
        Some(mut data) => {
            input::default_first_payment_date(&mut data, today);
            serde_json::from_value(data)?
        }
        None => input_from_flags(&args, today)?,
    };
    let result = mortgage::analyze_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let mut data = input::load_request(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for mortgage comparison")?;
    input::default_comparison_dates(&mut data, today);
    let comparison_input: ComparisonInput = serde_json::from_value(data)?;
    let result = comparison::analyze_comparison(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}

fn input_from_flags(
    args: &CalculateArgs,
    today: NaiveDate,
) -> Result<MortgageInput, Box<dyn std::error::Error>> {
    let loan_amount = args
        .loan_amount
        .ok_or("--loan-amount is required (or provide --input)")?;
    let interest_rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let loan_term_years = args
        .term_years
        .ok_or("--term-years is required (or provide --input)")?;

    Ok(MortgageInput {
        loan_amount,
        interest_rate,
        loan_term_years,
        down_payment: args.down_payment,
        property_value: args.property_value,
        mortgage_type: args.mortgage_type.into(),
        payment_frequency: args.frequency.into(),
        buydown_type: args.buydown.map(Into::into),
        additional_principal_payment: args.extra_payment,
        additional_payment_frequency: args.extra_frequency.map(Into::into),
        first_payment_date: args.first_payment_date.unwrap_or(today),
    })
}
