use refi_core::tipping_point::{self, TippingPointInput, RATE_FLOOR};
use refi_core::types::{LoanTerms, ReferenceDate};
use refi_core::RefiError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// End-to-end tipping point analysis
// ===========================================================================

fn reference_scenario() -> TippingPointInput {
    // The stock scenario: 697k at 6.625% over 30 years, four payments in
    // as of November 2025, selling July 2035, 2% closing costs.
    TippingPointInput {
        loan: LoanTerms {
            principal: dec!(697_000),
            annual_rate: dec!(6.625),
            term_months: 360,
        },
        payments_made: 4,
        sale_year: 2035,
        sale_month: 7,
        closing_cost_pct: dec!(0.02),
        current: ReferenceDate {
            year: 2025,
            month: 11,
        },
    }
}

#[test]
fn test_reference_scenario_horizon() {
    let result = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();
    let horizon = &result.result.horizon;

    // Ten years of payments from Aug 2025 through Jul 2035.
    assert_eq!(horizon.months_until_sale, 120);
    assert_eq!(horizon.first_payment, "Aug 2025");
    assert_eq!(horizon.sale, "Jul 2035");
    assert_eq!(result.result.benchmark.refi_payments_until_sale, 116);
}

#[test]
fn test_reference_scenario_finds_both_tipping_points() {
    let result = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();
    let tipping = &result.result.tipping;

    assert!(tipping.sale.found);
    assert!(tipping.lifetime.found);
    assert!(result.warnings.is_empty());

    for point in [&tipping.sale, &tipping.lifetime] {
        assert!(point.rate < dec!(6.625), "tipping rate must drop below the original");
        assert!(point.rate > RATE_FLOOR, "tipping rate must sit above the scan floor");
        assert_eq!(point.rate_drop, dec!(6.625) - point.rate);
        assert!(point.rate_drop > Decimal::ZERO);
    }
}

#[test]
fn test_reference_scenario_closing_costs() {
    let result = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();
    let benchmark = &result.result.benchmark;

    // Four payments barely dent a 30-year principal, so the 2% closing
    // costs land just under 2% of the original amount.
    assert_eq!(
        benchmark.closing_costs,
        benchmark.remaining_principal * dec!(0.02)
    );
    assert!(benchmark.remaining_principal > dec!(690_000));
    assert!(benchmark.remaining_principal < dec!(697_000));
    assert!(benchmark.closing_costs > dec!(13_800));
    assert!(benchmark.closing_costs < dec!(13_940));
}

#[test]
fn test_reference_scenario_comparison_rows() {
    let result = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();
    let analysis = &result.result;

    assert!(!analysis.comparison.is_empty());
    assert!(analysis.comparison.len() <= 5);

    for pair in analysis.comparison.windows(2) {
        assert!(pair[0].rate > pair[1].rate, "rows must descend strictly");
    }
    for row in &analysis.comparison {
        assert!(row.rate < dec!(6.625));
    }

    // At the sale tipping rate itself both horizons are past break-even at
    // the sale horizon, and savings grow as the rate falls.
    let at_tipping: Vec<_> = analysis
        .comparison
        .iter()
        .filter(|r| r.rate <= analysis.tipping.sale.rate)
        .collect();
    for row in at_tipping {
        assert!(row.savings_at_sale > Decimal::ZERO);
    }
}

#[test]
fn test_higher_closing_costs_demand_a_lower_rate() {
    let cheap = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();

    let expensive_input = TippingPointInput {
        closing_cost_pct: dec!(0.05),
        ..reference_scenario()
    };
    let expensive = tipping_point::analyze_tipping_point(&expensive_input).unwrap();

    assert!(
        expensive.result.tipping.sale.rate <= cheap.result.tipping.sale.rate,
        "steeper closing costs cannot raise the sale tipping rate"
    );
    assert!(
        expensive.result.tipping.lifetime.rate <= cheap.result.tipping.lifetime.rate,
        "steeper closing costs cannot raise the lifetime tipping rate"
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let first = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();
    let second = tipping_point::analyze_tipping_point(&reference_scenario()).unwrap();

    assert_eq!(first.result, second.result);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_zero_payments_made() {
    let input = TippingPointInput {
        payments_made: 0,
        ..reference_scenario()
    };
    let result = tipping_point::analyze_tipping_point(&input).unwrap();
    let analysis = &result.result;

    // First payment falls the month after the reference date.
    assert_eq!(analysis.horizon.first_payment, "Dec 2025");
    assert_eq!(analysis.horizon.months_until_sale, 116);
    assert_eq!(analysis.benchmark.remaining_principal, dec!(697_000));
}

#[test]
fn test_unreachable_floor_reports_original_rate() {
    // Punitive closing costs push break-even below the scan floor for the
    // sale horizon, so the analysis falls back and warns.
    let input = TippingPointInput {
        closing_cost_pct: dec!(0.60),
        ..reference_scenario()
    };
    let result = tipping_point::analyze_tipping_point(&input).unwrap();
    let tipping = &result.result.tipping;

    assert!(!tipping.sale.found);
    assert_eq!(tipping.sale.rate, dec!(6.625));
    assert_eq!(tipping.sale.rate_drop, Decimal::ZERO);
    assert!(!result.warnings.is_empty());
}

// ===========================================================================
// Terminal errors
// ===========================================================================

#[test]
fn test_sale_before_present_is_fatal() {
    let input = TippingPointInput {
        sale_year: 2025,
        sale_month: 10,
        ..reference_scenario()
    };
    let err = tipping_point::analyze_tipping_point(&input).unwrap_err();
    assert!(matches!(err, RefiError::InvalidHorizon { .. }));
}

#[test]
fn test_sale_month_out_of_range_is_fatal() {
    let input = TippingPointInput {
        sale_month: 0,
        ..reference_scenario()
    };
    let err = tipping_point::analyze_tipping_point(&input).unwrap_err();
    assert!(matches!(err, RefiError::InvalidInput { .. }));
}

#[test]
fn test_error_message_names_the_sale_month() {
    let input = TippingPointInput {
        sale_year: 2025,
        sale_month: 9,
        ..reference_scenario()
    };
    let err = tipping_point::analyze_tipping_point(&input).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Sep 2025"), "got: {}", message);
}
