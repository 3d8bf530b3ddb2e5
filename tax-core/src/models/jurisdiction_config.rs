use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntityType, Jurisdiction, TaxBracket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code.
    pub code: String,
    pub symbol: String,
    /// Minor-unit digits shown when formatting (0 for JPY).
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsRates {
    pub short_term_rate: Decimal,
    pub long_term_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityConfig {
    pub employee_rate: Decimal,
    /// Reference only; employer contributions are not charged to the person.
    pub employer_rate: Decimal,
    /// Income above the cap is not subject to contributions.
    pub cap: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub standard_deduction: Decimal,
    /// Informational. The allowance is already applied either as a 0 % band
    /// (UK) or through `standard_deduction` (Canada, Hong Kong).
    pub personal_allowance: Decimal,
}

/// Reference tax data for one jurisdiction. All rates are percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionTaxConfig {
    pub jurisdiction: Jurisdiction,
    pub currency: Currency,
    pub brackets: Vec<TaxBracket>,
    pub capital_gains: CapitalGainsRates,
    pub dividend_rate: Decimal,
    /// Reported only, never applied to income.
    pub vat_gst_rate: Decimal,
    pub social_security: Option<SocialSecurityConfig>,
    pub deductions: Deductions,
    pub available_entity_types: Vec<EntityType>,
}

impl JurisdictionTaxConfig {
    /// Rate of the highest band.
    pub fn top_marginal_rate(&self) -> Decimal {
        self.brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn offers_entity_type(
        &self,
        entity_type: EntityType,
    ) -> bool {
        self.available_entity_types.contains(&entity_type)
    }
}
