use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntityType;

/// How income earned through an entity type is taxed. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTaxRule {
    pub entity_type: EntityType,
    pub corporate_rate: Decimal,
    pub owner_salary_taxable: bool,
    pub profit_distribution_tax: Decimal,
    /// When true, business income joins the owner's ordinary income and
    /// no corporate tax applies.
    pub allows_pass_through: bool,
    pub deductible_expenses: Vec<String>,
}
