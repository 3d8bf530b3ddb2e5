//! Multi-jurisdiction tax estimation.
//!
//! [`calculate_total_tax`] is the single calculation entry point; the other
//! free functions are read-only lookups for presentation layers. All of them
//! run against [`engine::default_engine`], built once from the compiled-in
//! tables. Build a [`TaxEngine`] directly to use custom tables.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{EntityType, Jurisdiction, TaxCalculationInput};
//!
//! let mut input = TaxCalculationInput::new(Jurisdiction::Singapore, EntityType::Individual);
//! input.capital_gains.long_term = dec!(50000);
//!
//! let result = tax_core::calculate_total_tax(&input).unwrap();
//! assert_eq!(result.capital_gains_tax.amount, dec!(0));
//! assert_eq!(tax_core::format_money(dec!(2500), Jurisdiction::Singapore).unwrap(), "S$2,500.00");
//! ```

pub mod calculations;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod registry;

use rust_decimal::Decimal;

pub use engine::{TaxEngine, default_engine};
pub use error::TaxEngineError;
pub use models::*;

pub fn calculate_total_tax(input: &TaxCalculationInput) -> Result<TaxCalculationResult, TaxEngineError> {
    default_engine()?.calculate_total_tax(input)
}

pub fn get_jurisdiction_config(
    jurisdiction: Jurisdiction
) -> Result<&'static JurisdictionTaxConfig, TaxEngineError> {
    default_engine()?.jurisdiction_config(jurisdiction)
}

pub fn get_entity_types_for_jurisdiction(
    jurisdiction: Jurisdiction
) -> Result<&'static [EntityType], TaxEngineError> {
    default_engine()?.entity_types_for_jurisdiction(jurisdiction)
}

pub fn get_entity_type_display_name(entity_type: EntityType) -> &'static str {
    entity_type.display_name()
}

pub fn format_money(
    amount: Decimal,
    jurisdiction: Jurisdiction,
) -> Result<String, TaxEngineError> {
    default_engine()?.format_money(amount, jurisdiction)
}
