//! Capital gains tax with separate short- and long-term rates.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, rate_of, round_half_up};
use crate::models::{CapitalGainsRates, CapitalGainsTax};

#[derive(Debug, Clone)]
pub struct CapitalGainsCalculator<'a> {
    rates: &'a CapitalGainsRates,
}

impl<'a> CapitalGainsCalculator<'a> {
    pub fn new(rates: &'a CapitalGainsRates) -> Self {
        Self { rates }
    }

    /// Taxes each term at its own rate and reports the weighted average
    /// rate over the combined gains (zero when there are no gains).
    pub fn calculate(
        &self,
        short_term_gains: Decimal,
        long_term_gains: Decimal,
    ) -> CapitalGainsTax {
        let amount = round_half_up(
            percent_of(short_term_gains, self.rates.short_term_rate)
                + percent_of(long_term_gains, self.rates.long_term_rate),
        );

        CapitalGainsTax {
            amount,
            rate: rate_of(amount, short_term_gains + long_term_gains),
        }
    }
}
