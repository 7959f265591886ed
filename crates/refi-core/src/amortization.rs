//! Level-pay amortization primitives: fixed payment, remaining balance
//! and remaining interest. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RefiError;
use crate::types::{LoanStatus, Money, Rate};
use crate::RefiResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Monthly periodic rate from an annual percent quote.
fn monthly_rate(annual_rate: Rate) -> Decimal {
    annual_rate / PERCENT / MONTHS_PER_YEAR
}

/// Compute base^n for an integer exponent via iterative multiplication.
fn iterative_pow(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result *= base;
    }
    result
}

/// Fixed monthly principal-and-interest payment for a level-pay loan.
///
/// A non-positive rate degenerates to straight principal division, which
/// keeps the annuity formula away from its r = 0 singularity.
pub fn fixed_payment(principal: Money, annual_rate: Rate, term_months: u32) -> RefiResult<Money> {
    validate_terms(principal, term_months)?;

    if annual_rate <= Decimal::ZERO {
        return Ok(principal / Decimal::from(term_months));
    }

    let r = monthly_rate(annual_rate);
    let growth = iterative_pow(Decimal::ONE + r, term_months);
    let denom = growth - Decimal::ONE;
    if denom <= Decimal::ZERO {
        return Err(RefiError::DivisionByZero {
            context: format!("annuity factor over a {}-month term", term_months),
        });
    }

    Ok(principal * r * growth / denom)
}

/// Remaining balance, fixed payment and remaining interest after
/// `payments_elapsed` sequential payments.
pub fn loan_status(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    payments_elapsed: u32,
) -> RefiResult<LoanStatus> {
    if payments_elapsed > term_months {
        return Err(RefiError::InvalidInput {
            field: "payments_elapsed".into(),
            reason: format!(
                "{} payments exceed the {}-month term",
                payments_elapsed, term_months
            ),
        });
    }

    let payment = fixed_payment(principal, annual_rate, term_months)?;
    let r = monthly_rate(annual_rate);

    let mut balance = principal;
    for _ in 0..payments_elapsed {
        let interest = balance * r;
        balance -= payment - interest;
    }

    // Sum of future payments minus future principal.
    let remaining_interest = payment * Decimal::from(term_months - payments_elapsed) - balance;

    Ok(LoanStatus {
        remaining_balance: balance,
        fixed_payment: payment,
        remaining_interest,
    })
}

fn validate_terms(principal: Money, term_months: u32) -> RefiResult<()> {
    if principal <= Decimal::ZERO {
        return Err(RefiError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if term_months == 0 {
        return Err(RefiError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    Ok(())
}
