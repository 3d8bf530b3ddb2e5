//! Integrity checks applied when a registry is built.

use rust_decimal::Decimal;

use crate::error::TaxEngineError;
use crate::format::find_currency;
use crate::models::{Currency, EntityTaxRule, JurisdictionTaxConfig, TaxBracket};

fn check_rate(
    owner: &str,
    field: &'static str,
    rate: Decimal,
) -> Result<(), TaxEngineError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(TaxEngineError::InvalidRate {
            owner: owner.to_string(),
            field,
            rate,
        });
    }
    Ok(())
}

/// Brackets must start at zero, be contiguous and ascending, and end with a
/// single unbounded band.
pub(crate) fn validate_brackets(
    owner: &str,
    brackets: &[TaxBracket],
) -> Result<(), TaxEngineError> {
    let malformed = |reason: String| TaxEngineError::MalformedBracketTable {
        jurisdiction: owner.to_string(),
        reason,
    };

    let first = brackets
        .first()
        .ok_or_else(|| malformed("no brackets".to_string()))?;
    if first.min_income != Decimal::ZERO {
        return Err(malformed(format!(
            "first bracket starts at {} instead of 0",
            first.min_income
        )));
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        check_rate(owner, "bracket rate", bracket.rate)?;

        match bracket.max_income {
            Some(ceiling) if ceiling <= bracket.min_income => {
                return Err(malformed(format!(
                    "bracket {index} has max {ceiling} not above min {}",
                    bracket.min_income
                )));
            }
            Some(ceiling) => {
                let Some(next) = brackets.get(index + 1) else {
                    return Err(malformed("last bracket must be unbounded".to_string()));
                };
                if next.min_income != ceiling {
                    return Err(malformed(format!(
                        "gap or overlap between {ceiling} and {}",
                        next.min_income
                    )));
                }
            }
            None if index != last_index => {
                return Err(malformed(format!(
                    "bracket {index} is unbounded but is not the last bracket"
                )));
            }
            None => {}
        }
    }

    Ok(())
}

fn check_amount(
    owner: &str,
    field: &'static str,
    amount: Decimal,
) -> Result<(), TaxEngineError> {
    if amount < Decimal::ZERO {
        return Err(TaxEngineError::InvalidConfigAmount {
            owner: owner.to_string(),
            field,
            amount,
        });
    }
    Ok(())
}

/// The configured currency must be a supported one and agree with it on
/// symbol and minor-unit digits.
fn check_currency(
    owner: &str,
    currency: &Currency,
) -> Result<(), TaxEngineError> {
    let invalid = |reason: String| TaxEngineError::InvalidCurrency {
        jurisdiction: owner.to_string(),
        reason,
    };

    let supported = Currency::from(
        find_currency(&currency.code).map_err(|_| invalid(format!("unsupported code {}", currency.code)))?,
    );
    if supported.symbol != currency.symbol {
        return Err(invalid(format!(
            "{} symbol is '{}', not '{}'",
            currency.code, supported.symbol, currency.symbol
        )));
    }
    if supported.decimals != currency.decimals {
        return Err(invalid(format!(
            "{} has {} decimals, not {}",
            currency.code, supported.decimals, currency.decimals
        )));
    }
    Ok(())
}

pub(crate) fn validate_jurisdiction(config: &JurisdictionTaxConfig) -> Result<(), TaxEngineError> {
    let owner = config.jurisdiction.as_str();

    validate_brackets(owner, &config.brackets)?;
    check_rate(owner, "short_term_rate", config.capital_gains.short_term_rate)?;
    check_rate(owner, "long_term_rate", config.capital_gains.long_term_rate)?;
    check_rate(owner, "dividend_rate", config.dividend_rate)?;
    check_rate(owner, "vat_gst_rate", config.vat_gst_rate)?;
    if let Some(social) = &config.social_security {
        check_rate(owner, "employee_rate", social.employee_rate)?;
        check_rate(owner, "employer_rate", social.employer_rate)?;
        if let Some(cap) = social.cap {
            check_amount(owner, "social_security.cap", cap)?;
        }
    }
    check_amount(owner, "standard_deduction", config.deductions.standard_deduction)?;
    check_amount(owner, "personal_allowance", config.deductions.personal_allowance)?;
    check_currency(owner, &config.currency)?;

    Ok(())
}

pub(crate) fn validate_entity_rule(rule: &EntityTaxRule) -> Result<(), TaxEngineError> {
    let owner = rule.entity_type.as_str();

    check_rate(owner, "corporate_rate", rule.corporate_rate)?;
    check_rate(owner, "profit_distribution_tax", rule.profit_distribution_tax)?;

    Ok(())
}
