mod calculation_input;
mod calculation_result;
mod entity_rule;
mod entity_type;
mod income;
mod jurisdiction;
mod jurisdiction_config;
mod tax_bracket;

pub use calculation_input::{CapitalGains, TaxCalculationInput};
pub use calculation_result::{
    CapitalGainsTax, CorporateTax, DividendTax, IncomeTax, SocialSecurity, TaxCalculationResult,
    VatGst,
};
pub use entity_rule::EntityTaxRule;
pub use entity_type::EntityType;
pub use income::{CustomIncomeSource, IncomeBucket, IncomeType, TaxTreatment};
pub use jurisdiction::Jurisdiction;
pub use jurisdiction_config::{
    CapitalGainsRates, Currency, Deductions, JurisdictionTaxConfig, SocialSecurityConfig,
};
pub use tax_bracket::TaxBracket;
