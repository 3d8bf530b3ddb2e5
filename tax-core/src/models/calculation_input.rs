use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CustomIncomeSource, EntityType, Jurisdiction};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalGains {
    pub short_term: Decimal,
    pub long_term: Decimal,
}

/// Everything the engine needs for one calculation.
///
/// Money fields default to zero when deserialized, so a profile only has to
/// list what applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationInput {
    pub jurisdiction: Jurisdiction,
    pub entity_type: EntityType,
    #[serde(default)]
    pub salary_income: Decimal,
    #[serde(default)]
    pub business_income: Decimal,
    #[serde(default)]
    pub capital_gains: CapitalGains,
    #[serde(default)]
    pub dividends: Decimal,
    #[serde(default)]
    pub rental_income: Decimal,
    #[serde(default)]
    pub crypto_gains: Decimal,
    #[serde(default)]
    pub deductible_expenses: Decimal,
    #[serde(default)]
    pub custom_income_sources: Vec<CustomIncomeSource>,
}

impl TaxCalculationInput {
    /// An input with every money field at zero.
    pub fn new(
        jurisdiction: Jurisdiction,
        entity_type: EntityType,
    ) -> Self {
        Self {
            jurisdiction,
            entity_type,
            salary_income: Decimal::ZERO,
            business_income: Decimal::ZERO,
            capital_gains: CapitalGains::default(),
            dividends: Decimal::ZERO,
            rental_income: Decimal::ZERO,
            crypto_gains: Decimal::ZERO,
            deductible_expenses: Decimal::ZERO,
            custom_income_sources: Vec::new(),
        }
    }

    /// Declared money fields paired with their field names, in declaration
    /// order. Custom sources are not included.
    pub fn money_fields(&self) -> [(&'static str, Decimal); 8] {
        [
            ("salary_income", self.salary_income),
            ("business_income", self.business_income),
            ("capital_gains.short_term", self.capital_gains.short_term),
            ("capital_gains.long_term", self.capital_gains.long_term),
            ("dividends", self.dividends),
            ("rental_income", self.rental_income),
            ("crypto_gains", self.crypto_gains),
            ("deductible_expenses", self.deductible_expenses),
        ]
    }
}
