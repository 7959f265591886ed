use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use refi_core::amortization;

/// Arguments for the fixed payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub term: u32,
}

/// Arguments for the loan status snapshot
#[derive(Args)]
pub struct LoanStatusArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub term: u32,

    /// Payments already made
    #[arg(long)]
    pub paid: u32,
}

#[derive(Debug, Serialize)]
struct PaymentOutput {
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
    fixed_payment: Decimal,
}

#[derive(Debug, Serialize)]
struct LoanStatusOutput {
    remaining_balance: Decimal,
    fixed_payment: Decimal,
    remaining_interest: Decimal,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = amortization::fixed_payment(args.principal, args.rate, args.term)?;
    let output = PaymentOutput {
        principal: args.principal,
        annual_rate: args.rate,
        term_months: args.term,
        fixed_payment: payment.round_dp(2),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_loan_status(args: LoanStatusArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let status = amortization::loan_status(args.principal, args.rate, args.term, args.paid)?;
    let output = LoanStatusOutput {
        remaining_balance: status.remaining_balance.round_dp(2),
        fixed_payment: status.fixed_payment.round_dp(2),
        remaining_interest: status.remaining_interest.round_dp(2),
    };
    Ok(serde_json::to_value(output)?)
}
