pub mod amortization;
pub mod tipping_point;
