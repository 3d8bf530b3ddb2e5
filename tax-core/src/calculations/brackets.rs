//! Progressive income tax over an ordered bracket schedule.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::ProgressiveBracketCalculator;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(10)),
//!     TaxBracket::new(dec!(10000), Some(dec!(40000)), dec!(20)),
//!     TaxBracket::new(dec!(40000), None, dec!(40)),
//! ];
//!
//! let calculator = ProgressiveBracketCalculator::new(&brackets);
//! let result = calculator.calculate(dec!(50000), dec!(50000));
//!
//! // 10000 * 10% + 30000 * 20% + 10000 * 40%
//! assert_eq!(result.amount, dec!(11000.00));
//! assert_eq!(result.effective_rate, dec!(22.00));
//! assert_eq!(result.marginal_rate, dec!(40));
//! ```

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::{max, percent_of, rate_of, round_half_up};
use crate::models::IncomeTax;

/// Calculator for progressive income tax.
///
/// Brackets must be sorted by `min_income`, contiguous, and end with an
/// unbounded band. [`crate::registry::JurisdictionRegistry`] enforces this
/// for every table it hands out.
#[derive(Debug, Clone)]
pub struct ProgressiveBracketCalculator<'a> {
    tax_brackets: &'a [TaxBracket],
}

impl<'a> ProgressiveBracketCalculator<'a> {
    pub fn new(tax_brackets: &'a [TaxBracket]) -> Self {
        Self { tax_brackets }
    }

    /// Taxable base after deductions, clamped at zero.
    pub fn taxable_income(
        gross_income: Decimal,
        standard_deduction: Decimal,
        deductible_expenses: Decimal,
    ) -> Decimal {
        max(
            gross_income - standard_deduction - deductible_expenses,
            Decimal::ZERO,
        )
    }

    /// Computes income tax on `taxable_income`.
    ///
    /// Effective and marginal rates are both measured against
    /// `gross_income`, so they describe the burden on everything earned
    /// rather than on the deducted base. The effective rate comes from the
    /// unrounded tax and never exceeds [`Self::top_rate`].
    pub fn calculate(
        &self,
        taxable_income: Decimal,
        gross_income: Decimal,
    ) -> IncomeTax {
        let exact = self.exact_tax_on(taxable_income);

        IncomeTax {
            amount: round_half_up(exact),
            effective_rate: rate_of(exact, gross_income).min(self.top_rate()),
            marginal_rate: self.marginal_rate(gross_income),
        }
    }

    /// Tax due on `taxable_income`, rounded to cents.
    pub fn tax_on(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        round_half_up(self.exact_tax_on(taxable_income))
    }

    fn exact_tax_on(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        let mut previous_ceiling = Decimal::ZERO;

        for bracket in self.tax_brackets {
            if taxable_income <= bracket.min_income {
                break;
            }

            let lower = max(bracket.min_income, previous_ceiling);
            let upper = bracket
                .max_income
                .map_or(taxable_income, |ceiling| ceiling.min(taxable_income));

            if upper > lower {
                tax += percent_of(upper - lower, bracket.rate);
            }
            previous_ceiling = max(previous_ceiling, upper);
        }

        tax
    }

    /// Rate of the band `income` falls into; zero when `income` is zero.
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.tax_brackets
            .iter()
            .take_while(|b| income > b.min_income)
            .last()
            .map_or(Decimal::ZERO, |b| b.rate)
    }

    /// Highest rate in the schedule.
    pub fn top_rate(&self) -> Decimal {
        self.tax_brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}
