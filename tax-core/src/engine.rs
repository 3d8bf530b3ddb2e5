//! The calculation pipeline and the lookups served alongside it.
//!
//! | Stage | Component |
//! |-------|-----------|
//! | Boundary checks | [`TaxEngine::calculate_total_tax`] |
//! | Custom income routing | [`IncomeTotals`] |
//! | Income tax | [`ProgressiveBracketCalculator`] |
//! | Capital gains | [`CapitalGainsCalculator`] |
//! | Dividends | [`DividendTaxCalculator`] |
//! | Corporate tax | [`CorporateTaxCalculator`] |
//! | Social security | [`SocialSecurityCalculator`] |
//! | Totals | [`TotalTaxAggregator`] |
//! | Advice | [`SuggestionEngine`] |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{EntityType, Jurisdiction, TaxCalculationInput, TaxEngine};
//!
//! let engine = TaxEngine::builtin().unwrap();
//! let mut input = TaxCalculationInput::new(Jurisdiction::UnitedStates, EntityType::Individual);
//! input.salary_income = dec!(100000);
//!
//! let result = engine.calculate_total_tax(&input).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(86150));
//! assert_eq!(result.income_tax.marginal_rate, dec!(24));
//! assert_eq!(result.social_security.amount, dec!(7650.00));
//! ```

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::{
    CapitalGainsCalculator, CorporateTaxCalculator, DividendTaxCalculator, IncomeTotals,
    ProgressiveBracketCalculator, SocialSecurityCalculator, SuggestionContext, SuggestionEngine,
    TaxComponents, TotalTaxAggregator,
};
use crate::error::TaxEngineError;
use crate::format;
use crate::models::{
    EntityTaxRule, EntityType, Jurisdiction, JurisdictionTaxConfig, TaxCalculationInput,
    TaxCalculationResult, VatGst,
};
use crate::registry::{EntityRuleRegistry, JurisdictionRegistry};

/// Largest accepted value for any single money field.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Read-only tax engine over a pair of validated registries.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    jurisdictions: JurisdictionRegistry,
    entities: EntityRuleRegistry,
    suggestions: SuggestionEngine,
}

impl TaxEngine {
    /// Pairs the registries, checking that every entity type a jurisdiction
    /// offers has a rule.
    ///
    /// # Errors
    ///
    /// [`TaxEngineError::UnknownEntityType`] naming the first missing rule.
    pub fn new(
        jurisdictions: JurisdictionRegistry,
        entities: EntityRuleRegistry,
    ) -> Result<Self, TaxEngineError> {
        for config in jurisdictions.configs() {
            if let Some(missing) = config
                .available_entity_types
                .iter()
                .find(|e| !entities.contains(**e))
            {
                return Err(TaxEngineError::UnknownEntityType(missing.as_str().to_string()));
            }
        }

        Ok(Self {
            jurisdictions,
            entities,
            suggestions: SuggestionEngine::standard(),
        })
    }

    /// Engine over the built-in tables.
    pub fn builtin() -> Result<Self, TaxEngineError> {
        Self::new(JurisdictionRegistry::builtin()?, EntityRuleRegistry::builtin()?)
    }

    /// Replaces the suggestion rules.
    pub fn with_suggestions(
        mut self,
        suggestions: SuggestionEngine,
    ) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn jurisdictions(&self) -> &JurisdictionRegistry {
        &self.jurisdictions
    }

    pub fn entities(&self) -> &EntityRuleRegistry {
        &self.entities
    }

    pub fn jurisdiction_config(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Result<&JurisdictionTaxConfig, TaxEngineError> {
        self.jurisdictions.get(jurisdiction)
    }

    pub fn entity_types_for_jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Result<&[EntityType], TaxEngineError> {
        Ok(&self.jurisdictions.get(jurisdiction)?.available_entity_types)
    }

    pub fn entity_rule(
        &self,
        entity_type: EntityType,
    ) -> Result<&EntityTaxRule, TaxEngineError> {
        self.entities.get(entity_type)
    }

    /// Formats `amount` in the jurisdiction's currency.
    pub fn format_money(
        &self,
        amount: Decimal,
        jurisdiction: Jurisdiction,
    ) -> Result<String, TaxEngineError> {
        let config = self.jurisdictions.get(jurisdiction)?;
        format::format_money(amount, &config.currency)
    }

    /// Runs the full pipeline for one input.
    ///
    /// # Errors
    ///
    /// * [`TaxEngineError::NegativeAmount`] or
    ///   [`TaxEngineError::AmountTooLarge`] for an out-of-range money field.
    /// * [`TaxEngineError::UnknownJurisdiction`] or
    ///   [`TaxEngineError::UnknownEntityType`] when the registries lack an
    ///   entry.
    /// * [`TaxEngineError::UnknownCurrency`] when the jurisdiction's currency
    ///   cannot be formatted.
    pub fn calculate_total_tax(
        &self,
        input: &TaxCalculationInput,
    ) -> Result<TaxCalculationResult, TaxEngineError> {
        validate_amounts(input)?;

        let config = self.jurisdictions.get(input.jurisdiction)?;
        let entity = self.entities.get(input.entity_type)?;
        let currency = format::find_currency(&config.currency.code)?;

        if !config.offers_entity_type(input.entity_type) {
            warn!(
                jurisdiction = %input.jurisdiction,
                entity_type = %input.entity_type,
                "entity type is not offered in this jurisdiction; calculating anyway"
            );
        }

        let totals = IncomeTotals::from_input(
            input,
            entity.allows_pass_through,
            config.deductions.standard_deduction,
        );

        let taxable_base = ProgressiveBracketCalculator::taxable_income(
            totals.ordinary_base,
            config.deductions.standard_deduction,
            input.deductible_expenses,
        );
        let income_tax = ProgressiveBracketCalculator::new(&config.brackets)
            .calculate(taxable_base, totals.ordinary_base);
        let capital_gains_tax = CapitalGainsCalculator::new(&config.capital_gains)
            .calculate(totals.short_term_gains, totals.long_term_gains);
        let dividend_tax = DividendTaxCalculator::new(config.dividend_rate).calculate(totals.dividends);
        let corporate_tax = CorporateTaxCalculator::new(entity).calculate(totals.business_income);
        let social_security = SocialSecurityCalculator::new(config.social_security.as_ref())
            .calculate(totals.social_security_base);

        debug!(
            jurisdiction = %input.jurisdiction,
            entity_type = %input.entity_type,
            ordinary_base = %totals.ordinary_base,
            taxable_base = %taxable_base,
            income_tax = %income_tax.amount,
            "components calculated"
        );

        let totals_out = TotalTaxAggregator::aggregate(
            totals.total_income,
            TaxComponents {
                income_tax: &income_tax,
                capital_gains_tax: &capital_gains_tax,
                dividend_tax: &dividend_tax,
                corporate_tax: corporate_tax.as_ref(),
                social_security: &social_security,
            },
        );

        let mut result = TaxCalculationResult {
            jurisdiction: input.jurisdiction,
            entity_type: input.entity_type,
            currency: config.currency.code.clone(),
            total_income: totals.total_income,
            taxable_income: TotalTaxAggregator::displayed_taxable_income(
                totals.ordinary_base,
                totals.total_deductions,
            ),
            income_tax,
            capital_gains_tax,
            dividend_tax,
            corporate_tax,
            social_security,
            vat_gst: VatGst {
                rate: config.vat_gst_rate,
            },
            total_tax: totals_out.total_tax,
            total_tax_rate: totals_out.total_tax_rate,
            net_income: totals_out.net_income,
            suggestions: Vec::new(),
        };

        let suggestions = self.suggestions.evaluate(&SuggestionContext {
            input,
            totals: &totals,
            entity,
            config,
            currency,
            result: &result,
        });
        result.suggestions = suggestions;

        debug!(
            total_tax = %result.total_tax,
            total_tax_rate = %result.total_tax_rate,
            suggestions = result.suggestions.len(),
            "calculation finished"
        );
        Ok(result)
    }
}

fn validate_amounts(input: &TaxCalculationInput) -> Result<(), TaxEngineError> {
    for (field, amount) in input.money_fields() {
        check_amount(field.to_string(), amount)?;
    }
    for (index, source) in input.custom_income_sources.iter().enumerate() {
        check_amount(format!("custom_income_sources[{index}].amount"), source.amount)?;
    }
    Ok(())
}

fn check_amount(
    field: String,
    amount: Decimal,
) -> Result<(), TaxEngineError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(TaxEngineError::NegativeAmount { field, amount });
    }
    if amount > MAX_AMOUNT {
        return Err(TaxEngineError::AmountTooLarge { field, amount });
    }
    Ok(())
}

static DEFAULT_ENGINE: OnceLock<Result<TaxEngine, TaxEngineError>> = OnceLock::new();

/// Process-wide engine over the built-in tables, built on first use.
pub fn default_engine() -> Result<&'static TaxEngine, TaxEngineError> {
    DEFAULT_ENGINE
        .get_or_init(TaxEngine::builtin)
        .as_ref()
        .map_err(Clone::clone)
}
