use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntityType, Jurisdiction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTax {
    pub amount: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsTax {
    pub amount: Decimal,
    /// Weighted average of the short- and long-term rates.
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendTax {
    pub amount: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTax {
    pub amount: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurity {
    pub amount: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatGst {
    pub rate: Decimal,
}

/// Output of one engine run. Rates are percentages; amounts are rounded to
/// cents.
///
/// `corporate_tax` is `None` when corporate tax does not apply at all, which
/// is different from `Some` with a zero amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub jurisdiction: Jurisdiction,
    pub entity_type: EntityType,
    pub currency: String,
    pub total_income: Decimal,
    /// Ordinary base minus deductions, before clamping at zero.
    pub taxable_income: Decimal,
    pub income_tax: IncomeTax,
    pub capital_gains_tax: CapitalGainsTax,
    pub dividend_tax: DividendTax,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate_tax: Option<CorporateTax>,
    pub social_security: SocialSecurity,
    pub vat_gst: VatGst,
    pub total_tax: Decimal,
    pub total_tax_rate: Decimal,
    pub net_income: Decimal,
    pub suggestions: Vec<String>,
}
