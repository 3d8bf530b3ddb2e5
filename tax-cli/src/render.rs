use std::fmt::Write;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::format::{currencies, find_currency, format_in};
use tax_core::{EntityType, JurisdictionTaxConfig, TaxCalculationResult};

/// Pretty-printed JSON. Absent corporate tax is omitted.
pub fn render_json(result: &TaxCalculationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result")
}

/// Human-readable breakdown, one component per line.
pub fn render_text(
    result: &TaxCalculationResult,
    config: &JurisdictionTaxConfig,
) -> Result<String> {
    let currency = find_currency(&config.currency.code)?;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{} ({}) / {}",
        result.jurisdiction.display_name(),
        result.currency,
        result.entity_type.display_name()
    );
    line(&mut out, "Total income", currency, result.total_income, None);
    line(&mut out, "Taxable income", currency, result.taxable_income, None);
    let _ = writeln!(out);
    line(
        &mut out,
        "Income tax",
        currency,
        result.income_tax.amount,
        Some(result.income_tax.effective_rate),
    );
    let _ = writeln!(out, "  {:<22}{:>18}%", "Marginal rate", result.income_tax.marginal_rate);
    line(
        &mut out,
        "Capital gains tax",
        currency,
        result.capital_gains_tax.amount,
        Some(result.capital_gains_tax.rate),
    );
    line(
        &mut out,
        "Dividend tax",
        currency,
        result.dividend_tax.amount,
        Some(result.dividend_tax.rate),
    );
    if let Some(corporate) = &result.corporate_tax {
        line(&mut out, "Corporate tax", currency, corporate.amount, Some(corporate.rate));
    }
    line(
        &mut out,
        "Social security",
        currency,
        result.social_security.amount,
        Some(result.social_security.rate),
    );
    let _ = writeln!(out, "  {:<22}{:>18}%", "VAT/GST (reference)", result.vat_gst.rate);
    let _ = writeln!(out);
    line(
        &mut out,
        "Total tax",
        currency,
        result.total_tax,
        Some(result.total_tax_rate),
    );
    line(&mut out, "Net income", currency, result.net_income, None);

    if !result.suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions:");
        for suggestion in &result.suggestions {
            let _ = writeln!(out, "  - {suggestion}");
        }
    }

    Ok(out)
}

fn line(
    out: &mut String,
    label: &str,
    currency: &currencies::Currency,
    amount: Decimal,
    rate: Option<Decimal>,
) {
    let money = format_in(amount, currency);
    let _ = match rate {
        Some(rate) => writeln!(out, "  {label:<22}{money:>18}  ({rate}%)"),
        None => writeln!(out, "  {label:<22}{money:>18}"),
    };
}

pub fn render_jurisdictions<'a>(configs: impl Iterator<Item = &'a JurisdictionTaxConfig>) -> String {
    let mut out = String::new();
    for config in configs {
        let _ = writeln!(
            out,
            "{:<4}{:<22}{:<5}top rate {}%",
            config.jurisdiction.as_str(),
            config.jurisdiction.display_name(),
            config.currency.code,
            config.top_marginal_rate()
        );
    }
    out
}

pub fn render_entity_types(entity_types: &[EntityType]) -> String {
    let mut out = String::new();
    for entity_type in entity_types {
        let _ = writeln!(out, "{:<22}{}", entity_type.as_str(), entity_type.display_name());
    }
    out
}

pub fn render_brackets(config: &JurisdictionTaxConfig) -> Result<String> {
    let currency = find_currency(&config.currency.code)?;
    let mut out = String::new();
    for bracket in &config.brackets {
        let upper = bracket
            .max_income
            .map_or_else(|| "and above".to_string(), |max| format_in(max, currency));
        let _ = writeln!(
            out,
            "{:>18} - {:<18}{}%",
            format_in(bracket.min_income, currency),
            upper,
            bracket.rate
        );
    }
    Ok(out)
}
