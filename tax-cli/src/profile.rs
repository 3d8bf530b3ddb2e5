//! Calculation profiles: a TOML file naming the jurisdiction, entity type
//! and income figures, optionally topped up from a custom income CSV.
//!
//! ```toml
//! jurisdiction = "USA"
//! entity_type = "llc"
//! salary_income = "85000"
//! business_income = "40000"
//!
//! [capital_gains]
//! long_term = "12000"
//!
//! [[custom_income_sources]]
//! id = "royalties"
//! label = "Book royalties"
//! amount = "3000"
//! income_type = "royalties"
//! tax_treatment = "passive_income"
//! ```

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use tax_core::TaxCalculationInput;
use tax_data::IncomeLoader;
use tracing::debug;

pub fn parse_profile(text: &str) -> Result<TaxCalculationInput> {
    toml::from_str(text).context("invalid profile")
}

pub fn load_profile(path: &Path) -> Result<TaxCalculationInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;
    let input = parse_profile(&text).with_context(|| format!("in {}", path.display()))?;
    debug!(
        path = %path.display(),
        jurisdiction = %input.jurisdiction,
        entity_type = %input.entity_type,
        "profile loaded"
    );
    Ok(input)
}

/// Appends the sources in `path` to the profile's own custom sources.
pub fn append_income_csv(
    input: &mut TaxCalculationInput,
    path: &Path,
) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let sources = IncomeLoader::load(file)
        .with_context(|| format!("Failed to load custom income: {}", path.display()))?;
    debug!(path = %path.display(), sources = sources.len(), "custom income loaded");
    input.custom_income_sources.extend(sources);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{EntityType, IncomeType, Jurisdiction, TaxTreatment};

    use super::*;

    #[test]
    fn parse_profile_minimal() {
        let input = parse_profile("jurisdiction = \"DE\"\nentity_type = \"gmbh\"\n").unwrap();

        assert_eq!(input, TaxCalculationInput::new(Jurisdiction::Germany, EntityType::Gmbh));
    }

    #[test]
    fn parse_profile_with_nested_fields() {
        let text = r#"
jurisdiction = "USA"
entity_type = "llc"
salary_income = "85000"

[capital_gains]
long_term = "12000"

[[custom_income_sources]]
id = "royalties"
label = "Book royalties"
amount = "3000"
income_type = "royalties"
tax_treatment = "passive_income"
"#;

        let input = parse_profile(text).unwrap();

        assert_eq!(input.salary_income, dec!(85000));
        assert_eq!(input.capital_gains.long_term, dec!(12000));
        assert_eq!(input.capital_gains.short_term, dec!(0));
        assert_eq!(input.custom_income_sources.len(), 1);
        assert_eq!(input.custom_income_sources[0].income_type, IncomeType::Royalties);
        assert_eq!(
            input.custom_income_sources[0].tax_treatment,
            TaxTreatment::PassiveIncome
        );
    }

    #[test]
    fn parse_profile_rejects_unknown_jurisdiction() {
        let err = parse_profile("jurisdiction = \"Atlantis\"\nentity_type = \"individual\"\n")
            .unwrap_err();

        assert!(err.to_string().contains("invalid profile"));
    }
}
