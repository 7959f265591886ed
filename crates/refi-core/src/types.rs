use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates quoted in annual percent (6.625 = 6.625%), the convention
/// mortgage rates are quoted in at every interface of this crate. Closing
/// costs are the exception: they travel as a plain fraction of balance.
pub type Rate = Decimal;

/// The contractual shape of a fixed-rate loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal borrowed at origination.
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_rate: Rate,
    /// Full term in months (360 for a 30-year loan).
    pub term_months: u32,
}

/// Point-in-time view of a loan after a number of payments. Derived on
/// demand from `LoanTerms`; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanStatus {
    /// Principal still outstanding.
    pub remaining_balance: Money,
    /// Level monthly principal-and-interest payment.
    pub fixed_payment: Money,
    /// Sum of all future interest: future payments minus future principal.
    pub remaining_interest: Money,
}

/// Calendar anchor mapping elapsed payments to month labels. Fixed
/// configuration, never read from the wall clock, so analyses stay
/// deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDate {
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl Default for ReferenceDate {
    fn default() -> Self {
        // The scenario the stock defaults were written against: November
        // 2025, just after the fourth payment.
        ReferenceDate {
            year: 2025,
            month: 11,
        }
    }
}

/// Resolved sale horizon for a loan already in repayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleHorizon {
    /// Total payments from the first payment through the sale month,
    /// inclusive. Always at least the payments already made.
    pub months_until_sale: u32,
    /// Month of the first payment, e.g. "Aug 2025".
    pub first_payment: String,
    /// Month of the planned sale, e.g. "Jul 2035".
    pub sale: String,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
