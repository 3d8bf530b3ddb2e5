//! Flat-rate dividend tax.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_half_up};
use crate::models::DividendTax;

#[derive(Debug, Clone, Copy)]
pub struct DividendTaxCalculator {
    rate: Decimal,
}

impl DividendTaxCalculator {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn calculate(
        &self,
        dividends: Decimal,
    ) -> DividendTax {
        DividendTax {
            amount: round_half_up(percent_of(dividends, self.rate)),
            rate: self.rate,
        }
    }
}
