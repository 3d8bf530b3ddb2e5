use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::{profile, render};
use tax_core::{EntityType, Jurisdiction, TaxEngine};

fn profile_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("profiles").join(name)
}

#[test]
fn us_llc_profile_calculates() {
    let input = profile::load_profile(&profile_path("us_llc.toml")).unwrap();
    let engine = TaxEngine::builtin().unwrap();

    let result = engine.calculate_total_tax(&input).unwrap();

    assert_eq!(input.entity_type, EntityType::Llc);
    assert_eq!(result.total_income, dec!(148500));
    // 85000 + 40000 pass-through - 13850 - 4000
    assert_eq!(result.taxable_income, dec!(107150));
    assert_eq!(result.corporate_tax, None);
    // (3000 + 6000) * 22% + 12000 * 15%
    assert_eq!(result.capital_gains_tax.amount, dec!(3780.00));
}

#[test]
fn de_gmbh_profile_calculates() {
    let input = profile::load_profile(&profile_path("de_gmbh.toml")).unwrap();
    let engine = TaxEngine::builtin().unwrap();

    let result = engine.calculate_total_tax(&input).unwrap();

    assert_eq!(input.jurisdiction, Jurisdiction::Germany);
    assert_eq!(result.corporate_tax.map(|c| c.amount), Some(dec!(45000.00)));
    assert_eq!(result.total_income, dec!(234500));
}

#[test]
fn missing_profile_reports_path() {
    let err = profile::load_profile(&profile_path("missing.toml")).unwrap_err();

    assert!(format!("{err:#}").contains("missing.toml"));
}

#[test]
fn json_output_round_trips() {
    let input = profile::load_profile(&profile_path("us_llc.toml")).unwrap();
    let result = TaxEngine::builtin().unwrap().calculate_total_tax(&input).unwrap();

    let json = render::render_json(&result).unwrap();
    let parsed: tax_core::TaxCalculationResult = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, result);
}
