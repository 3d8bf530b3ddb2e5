//! Sums the tax components into the headline totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::rate_of;
use crate::models::{CapitalGainsTax, CorporateTax, DividendTax, IncomeTax, SocialSecurity};

/// Borrowed view of the individually computed components.
#[derive(Debug, Clone, Copy)]
pub struct TaxComponents<'a> {
    pub income_tax: &'a IncomeTax,
    pub capital_gains_tax: &'a CapitalGainsTax,
    pub dividend_tax: &'a DividendTax,
    pub corporate_tax: Option<&'a CorporateTax>,
    pub social_security: &'a SocialSecurity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTotals {
    pub total_tax: Decimal,
    pub total_tax_rate: Decimal,
    pub net_income: Decimal,
}

pub struct TotalTaxAggregator;

impl TotalTaxAggregator {
    /// `total_tax` is the plain sum of the (already rounded) components, so
    /// it matches the breakdown to the cent.
    pub fn aggregate(
        total_income: Decimal,
        components: TaxComponents<'_>,
    ) -> TaxTotals {
        let total_tax = components.income_tax.amount
            + components.capital_gains_tax.amount
            + components.dividend_tax.amount
            + components.corporate_tax.map_or(Decimal::ZERO, |c| c.amount)
            + components.social_security.amount;

        TaxTotals {
            total_tax,
            total_tax_rate: rate_of(total_tax, total_income),
            net_income: total_income - total_tax,
        }
    }

    /// Displayed taxable income: the ordinary base minus all deductions,
    /// deliberately not clamped at zero.
    pub fn displayed_taxable_income(
        ordinary_base: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        ordinary_base - total_deductions
    }
}
