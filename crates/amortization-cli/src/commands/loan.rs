use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use amortization_core::loan::{self, LoanParameters, LoanType};
use amortization_core::periods::{CompoundingPeriod, DurationType, PaymentPeriod};
use amortization_core::with_metadata;

use crate::input;

/// Loan parameters, from a file, stdin, or individual flags
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal borrowed
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Nominal annual interest rate in percent (6 = 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term, in units of --duration
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Unit of --term: years, months, weeks or payments
    #[arg(long, default_value = "years")]
    pub duration: DurationType,

    /// Compounding period: daily, monthly, semi-annually, annually
    #[arg(long, default_value = "monthly")]
    pub compounding: CompoundingPeriod,

    /// Payment period: annually, twice-per-year, quarterly, every-other-month, monthly
    #[arg(long, default_value = "monthly")]
    pub payment_period: PaymentPeriod,

    /// Simple interest: divide the nominal rate by payments per year
    #[arg(long)]
    pub simple: bool,

    /// Loan type: generic, mortgage, auto, student
    #[arg(long, default_value = "generic")]
    pub loan_type: LoanType,

    /// Property taxes added to each payment
    #[arg(long)]
    pub property_taxes: Option<Decimal>,

    /// Hazard insurance added to each payment
    #[arg(long)]
    pub hazard_insurance: Option<Decimal>,

    /// Mortgage insurance added to each payment
    #[arg(long)]
    pub mortgage_insurance: Option<Decimal>,

    /// Extra principal paid with each payment
    #[arg(long)]
    pub additional_principal: Option<Decimal>,

    /// Date of the first payment (YYYY-MM-DD); dates each schedule row
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

fn load_params(args: LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_config(path);
    }
    if let Some(params) = input::stdin::read_stdin()? {
        return Ok(params);
    }

    let balance = args
        .balance
        .ok_or("--balance is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let term = args.term.ok_or("--term is required (or provide --input)")?;

    Ok(LoanParameters {
        compounding_period: args.compounding,
        payment_period: args.payment_period,
        duration_type: args.duration,
        is_simple: args.simple,
        loan_type: args.loan_type,
        property_taxes: args.property_taxes.unwrap_or_default(),
        hazard_insurance: args.hazard_insurance.unwrap_or_default(),
        mortgage_insurance: args.mortgage_insurance.unwrap_or_default(),
        additional_principal: args.additional_principal.unwrap_or_default(),
        first_payment_date: args.start_date,
        ..LoanParameters::new(balance, rate, term)
    })
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args)?;
    let start = Instant::now();
    let derived = loan::recalculate(&params)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let output = with_metadata(
        "Level-payment annuity formula",
        &params,
        Vec::new(),
        elapsed,
        derived,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args)?;
    let result = loan::build_amortization(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args)?;
    params.validate()?;
    let start = Instant::now();

    let rate_per_period = loan::effective_interest_rate(&params)?;
    let effective_annual_rate = loan::effective_annual_rate(&params)?;
    let num_years = loan::num_years_in_loan(&params)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let method = if params.is_simple {
        "Simple interest: nominal rate / payments per year"
    } else {
        "Compound conversion: (1 + r/m)^m = (1 + i)^p"
    };

    let output = with_metadata(
        method,
        &params,
        Vec::new(),
        elapsed,
        json!({
            "rate_per_period": rate_per_period,
            "effective_annual_rate": effective_annual_rate,
            "nominal_annual_rate": params.interest_rate / Decimal::ONE_HUNDRED,
            "num_years": num_years,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
