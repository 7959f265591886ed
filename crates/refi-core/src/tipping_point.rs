//! Refinance tipping-point search: sale-horizon resolution, benchmark
//! costs for the original loan, the descending-rate scan and the
//! comparison table built around the discovered rates.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{fixed_payment, loan_status};
use crate::error::RefiError;
use crate::types::{
    with_metadata, ComputationOutput, LoanTerms, Money, Rate, ReferenceDate, SaleHorizon,
};
use crate::RefiResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest candidate rate the scan will consider (exclusive floor).
pub const RATE_FLOOR: Rate = dec!(2.99);

/// Scan resolution in percentage points.
pub const RATE_STEP: Rate = dec!(0.001);

/// Every refinance is priced as a standard 30-year product, whatever the
/// original term was.
pub const REFI_TERM_MONTHS: u32 = 360;

/// Comparison-table rate offsets around the tipping points.
const TABLE_OFFSET_ABOVE: Rate = dec!(0.075);
const TABLE_OFFSET_BELOW: Rate = dec!(0.25);

/// Display rounding for table rates, in decimal places.
const RATE_DP: u32 = 3;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Full analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TippingPointInput {
    /// The loan currently in repayment.
    pub loan: LoanTerms,
    /// Payments already made on the original loan.
    pub payments_made: u32,
    /// Planned year of sale.
    pub sale_year: i32,
    /// Planned month of sale (1 = Jan, 12 = Dec).
    pub sale_month: u32,
    /// Closing costs rolled into the refinance, as a fraction of the
    /// remaining balance (0.02 = 2%).
    pub closing_cost_pct: Decimal,
    /// Calendar anchor for the elapsed-payments-to-month mapping.
    #[serde(default)]
    pub current: ReferenceDate,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A discovered (or defaulted) tipping rate for one horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TippingPoint {
    /// Highest refinance rate at which the horizon favours refinancing.
    /// Falls back to the original rate when no scanned rate qualifies.
    pub rate: Rate,
    /// Drop from the original rate; zero when nothing qualified.
    pub rate_drop: Rate,
    /// Whether any scanned rate satisfied the predicate.
    pub found: bool,
}

/// Tipping rates for both horizons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TippingPoints {
    /// Break-even through the planned sale date.
    pub sale: TippingPoint,
    /// Break-even over the whole remaining lifetime.
    pub lifetime: TippingPoint,
}

/// Original-loan costs and refinance sizing, computed once before the scan
/// and reused by every candidate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceBenchmark {
    /// Payments already made on the original loan.
    pub payments_made: u32,
    /// Fixed payment on the original loan.
    pub original_payment: Money,
    /// Balance outstanding when the refinance would close.
    pub remaining_principal: Money,
    /// Closing costs rolled into the new loan.
    pub closing_costs: Money,
    /// Principal of the refinanced loan: balance plus closing costs.
    pub refinanced_principal: Money,
    /// Payments left on the refinance before the sale.
    pub refi_payments_until_sale: u32,
    /// Original-loan cost through the sale: every payment through the sale
    /// month plus the balance handed over at sale.
    pub original_cost_at_sale: Money,
    /// Original-loan payments over its whole remaining term.
    pub original_remaining_payments: Money,
}

/// One row of the refinance comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub rate: Rate,
    pub monthly_savings: Money,
    pub savings_at_sale: Money,
    pub savings_lifetime: Money,
}

/// Complete analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TippingPointAnalysis {
    pub horizon: SaleHorizon,
    pub benchmark: RefinanceBenchmark,
    pub tipping: TippingPoints,
    pub comparison: Vec<ComparisonRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the complete analysis: validate, resolve the horizon, scan for the
/// tipping points and assemble the comparison table.
pub fn analyze_tipping_point(
    input: &TippingPointInput,
) -> RefiResult<ComputationOutput<TippingPointAnalysis>> {
    let start = Instant::now();
    validate_input(input)?;

    let horizon = resolve_sale_horizon(
        input.payments_made,
        input.sale_year,
        input.sale_month,
        input.current,
    )?;

    let (tipping, benchmark) = find_tipping_points(
        &input.loan,
        input.payments_made,
        &horizon,
        input.closing_cost_pct,
    )?;

    let comparison = build_comparison_table(&tipping, &benchmark, input.loan.annual_rate)?;

    let mut warnings = Vec::new();
    if !tipping.sale.found {
        warnings.push(format!(
            "No sale-horizon tipping point found above {}%; reporting the original rate",
            RATE_FLOOR
        ));
    }
    if !tipping.lifetime.found {
        warnings.push(format!(
            "No lifetime tipping point found above {}%; reporting the original rate",
            RATE_FLOOR
        ));
    }

    let analysis = TippingPointAnalysis {
        horizon,
        benchmark,
        tipping,
        comparison,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Descending-rate refinance tipping point scan",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

/// Resolve the sale horizon: the loan's first payment month and the
/// inclusive payment count from first payment through the sale month.
///
/// The reference month is the month of payment number `payments_made`, so
/// the first payment sits `payments_made - 1` months earlier; with no
/// payments made yet the first payment falls in the following month.
pub fn resolve_sale_horizon(
    payments_made: u32,
    sale_year: i32,
    sale_month: u32,
    current: ReferenceDate,
) -> RefiResult<SaleHorizon> {
    let current_date = month_start(current.year, current.month, "current date")?;
    let sale_date = month_start(sale_year, sale_month, "sale date")?;

    let first_payment = shift_months(current_date, 1 - i64::from(payments_made))?;

    let months_until_sale = i64::from(sale_date.year() - first_payment.year()) * 12
        + (i64::from(sale_date.month()) - i64::from(first_payment.month()))
        + 1;

    if months_until_sale < i64::from(payments_made) {
        return Err(RefiError::InvalidHorizon {
            sale: month_label(sale_date),
            months_until_sale,
            payments_made,
        });
    }

    Ok(SaleHorizon {
        months_until_sale: months_until_sale as u32,
        first_payment: month_label(first_payment),
        sale: month_label(sale_date),
    })
}

/// Locate the highest refinance rate that beats the original loan under
/// each horizon, scanning downward from the original rate to the floor.
///
/// The scan walks an integer step index (`rate = original - step * i`) in
/// exact decimal arithmetic, so no accumulated stepping error can skip or
/// duplicate a candidate near the floor. Each predicate latches on the
/// first qualifying candidate; the scan stops once both have latched.
pub fn find_tipping_points(
    loan: &LoanTerms,
    payments_made: u32,
    horizon: &SaleHorizon,
    closing_cost_pct: Decimal,
) -> RefiResult<(TippingPoints, RefinanceBenchmark)> {
    let benchmark = compute_benchmark(loan, payments_made, horizon, closing_cost_pct)?;

    let mut sale_rate: Option<Rate> = None;
    let mut lifetime_rate: Option<Rate> = None;

    let mut index = 0u32;
    loop {
        let rate = loan.annual_rate - RATE_STEP * Decimal::from(index);
        if rate <= RATE_FLOOR {
            break;
        }

        let refi_payment = fixed_payment(benchmark.refinanced_principal, rate, REFI_TERM_MONTHS)?;

        if lifetime_rate.is_none() {
            let refi_lifetime = refi_payment * Decimal::from(REFI_TERM_MONTHS);
            if refi_lifetime < benchmark.original_remaining_payments {
                lifetime_rate = Some(rate);
            }
        }

        if sale_rate.is_none() {
            let refi_cost = refi_cost_at_sale(&benchmark, rate, refi_payment)?;
            if refi_cost < benchmark.original_cost_at_sale {
                sale_rate = Some(rate);
            }
        }

        if sale_rate.is_some() && lifetime_rate.is_some() {
            break;
        }
        index += 1;
    }

    let points = TippingPoints {
        sale: resolve_point(sale_rate, loan.annual_rate),
        lifetime: resolve_point(lifetime_rate, loan.annual_rate),
    };
    Ok((points, benchmark))
}

/// Build the comparison table around the discovered tipping rates: up to
/// five display rates, rounded, deduplicated, strictly below the original
/// rate and sorted descending.
pub fn build_comparison_table(
    tipping: &TippingPoints,
    benchmark: &RefinanceBenchmark,
    original_rate: Rate,
) -> RefiResult<Vec<ComparisonRow>> {
    let mut rates: Vec<Rate> = [
        tipping.sale.rate + TABLE_OFFSET_ABOVE,
        tipping.sale.rate,
        tipping.sale.rate - TABLE_OFFSET_BELOW,
        tipping.lifetime.rate,
        tipping.lifetime.rate - TABLE_OFFSET_BELOW,
    ]
    .into_iter()
    .map(|r| r.round_dp(RATE_DP))
    .filter(|r| *r < original_rate)
    .collect();

    rates.sort();
    rates.dedup();
    rates.reverse();

    rates
        .into_iter()
        .map(|rate| comparison_row(rate, benchmark))
        .collect()
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn validate_input(input: &TippingPointInput) -> RefiResult<()> {
    if input.loan.principal <= Decimal::ZERO {
        return Err(RefiError::InvalidInput {
            field: "loan.principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if input.loan.term_months == 0 {
        return Err(RefiError::InvalidInput {
            field: "loan.term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if input.payments_made > input.loan.term_months {
        return Err(RefiError::InvalidInput {
            field: "payments_made".into(),
            reason: format!(
                "{} payments exceed the {}-month term",
                input.payments_made, input.loan.term_months
            ),
        });
    }
    if input.closing_cost_pct < Decimal::ZERO {
        return Err(RefiError::InvalidInput {
            field: "closing_cost_pct".into(),
            reason: "Closing cost fraction cannot be negative".into(),
        });
    }
    Ok(())
}

/// Original-loan costs and refinance sizing, computed once before the scan.
fn compute_benchmark(
    loan: &LoanTerms,
    payments_made: u32,
    horizon: &SaleHorizon,
    closing_cost_pct: Decimal,
) -> RefiResult<RefinanceBenchmark> {
    if horizon.months_until_sale < payments_made {
        return Err(RefiError::InvalidHorizon {
            sale: horizon.sale.clone(),
            months_until_sale: i64::from(horizon.months_until_sale),
            payments_made,
        });
    }
    if horizon.months_until_sale > loan.term_months {
        return Err(RefiError::InvalidInput {
            field: "sale_month".into(),
            reason: format!(
                "selling in {} means {} payments, past the {}-month term",
                horizon.sale, horizon.months_until_sale, loan.term_months
            ),
        });
    }

    let at_refinance = loan_status(
        loan.principal,
        loan.annual_rate,
        loan.term_months,
        payments_made,
    )?;
    let at_sale = loan_status(
        loan.principal,
        loan.annual_rate,
        loan.term_months,
        horizon.months_until_sale,
    )?;

    let closing_costs = at_refinance.remaining_balance * closing_cost_pct;
    let refinanced_principal = at_refinance.remaining_balance + closing_costs;

    let original_cost_at_sale = at_refinance.fixed_payment
        * Decimal::from(horizon.months_until_sale)
        + at_sale.remaining_balance;
    let original_remaining_payments =
        at_refinance.fixed_payment * Decimal::from(loan.term_months - payments_made);

    Ok(RefinanceBenchmark {
        payments_made,
        original_payment: at_refinance.fixed_payment,
        remaining_principal: at_refinance.remaining_balance,
        closing_costs,
        refinanced_principal,
        refi_payments_until_sale: horizon.months_until_sale - payments_made,
        original_cost_at_sale,
        original_remaining_payments,
    })
}

/// Total cost of the refinance path through the sale: payments already made
/// on the original loan, refinance payments until the sale, and the
/// refinance balance handed over at sale.
fn refi_cost_at_sale(
    benchmark: &RefinanceBenchmark,
    rate: Rate,
    refi_payment: Money,
) -> RefiResult<Money> {
    let at_sale = loan_status(
        benchmark.refinanced_principal,
        rate,
        REFI_TERM_MONTHS,
        benchmark.refi_payments_until_sale,
    )?;

    Ok(benchmark.original_payment * Decimal::from(benchmark.payments_made)
        + refi_payment * Decimal::from(benchmark.refi_payments_until_sale)
        + at_sale.remaining_balance)
}

fn comparison_row(rate: Rate, benchmark: &RefinanceBenchmark) -> RefiResult<ComparisonRow> {
    let refi_payment = fixed_payment(benchmark.refinanced_principal, rate, REFI_TERM_MONTHS)?;
    let refi_cost = refi_cost_at_sale(benchmark, rate, refi_payment)?;

    Ok(ComparisonRow {
        rate,
        monthly_savings: benchmark.original_payment - refi_payment,
        savings_at_sale: benchmark.original_cost_at_sale - refi_cost,
        savings_lifetime: benchmark.original_remaining_payments
            - refi_payment * Decimal::from(REFI_TERM_MONTHS),
    })
}

fn resolve_point(found: Option<Rate>, original_rate: Rate) -> TippingPoint {
    match found {
        Some(rate) => TippingPoint {
            rate,
            rate_drop: original_rate - rate,
            found: true,
        },
        None => TippingPoint {
            rate: original_rate,
            rate_drop: Decimal::ZERO,
            found: false,
        },
    }
}

fn month_start(year: i32, month: u32, what: &str) -> RefiResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| RefiError::InvalidInput {
        field: what.to_string(),
        reason: format!("{}-{:02} is not a valid calendar month", year, month),
    })
}

fn shift_months(date: NaiveDate, delta: i64) -> RefiResult<NaiveDate> {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs() as u32))
    };
    shifted.ok_or_else(|| RefiError::DateError(format!("cannot shift {} by {} months", date, delta)))
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
