//! Advisory suggestions derived from a finished calculation.
//!
//! Each [`SuggestionRule`] is an independent predicate over a
//! [`SuggestionContext`] that yields at most one message. Rules never see
//! each other's output, and the engine evaluates them in list order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::classifier::IncomeTotals;
use crate::calculations::common::percent_of;
use crate::format::{currencies, format_in};
use crate::models::{
    EntityTaxRule, Jurisdiction, JurisdictionTaxConfig, TaxCalculationInput, TaxCalculationResult,
};

/// Pass-through business income above this amount triggers the expense review.
pub const EXPENSE_REVIEW_THRESHOLD: Decimal = dec!(50000);

/// Marginal income tax rate (percent) above which deferral is suggested.
pub const HIGH_MARGINAL_RATE: Decimal = dec!(30);

const LOW_TAX_JURISDICTIONS: &[Jurisdiction] = &[
    Jurisdiction::Singapore,
    Jurisdiction::UnitedArabEmirates,
    Jurisdiction::HongKong,
];

/// Everything a rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub input: &'a TaxCalculationInput,
    pub totals: &'a IncomeTotals,
    pub entity: &'a EntityTaxRule,
    pub config: &'a JurisdictionTaxConfig,
    pub currency: &'a currencies::Currency,
    pub result: &'a TaxCalculationResult,
}

impl SuggestionContext<'_> {
    fn money(
        &self,
        amount: Decimal,
    ) -> String {
        format_in(amount, self.currency)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionRule {
    pub name: &'static str,
    pub check: fn(&SuggestionContext<'_>) -> Option<String>,
}

pub const HOLD_FOR_LONG_TERM: SuggestionRule = SuggestionRule {
    name: "hold_for_long_term",
    check: hold_for_long_term,
};
pub const MAXIMIZE_BUSINESS_EXPENSES: SuggestionRule = SuggestionRule {
    name: "maximize_business_expenses",
    check: maximize_business_expenses,
};
pub const BALANCE_SALARY_AND_DIVIDENDS: SuggestionRule = SuggestionRule {
    name: "balance_salary_and_dividends",
    check: balance_salary_and_dividends,
};
pub const RETIREMENT_DEFERRAL: SuggestionRule = SuggestionRule {
    name: "retirement_deferral",
    check: retirement_deferral,
};
pub const US_CRYPTO_LOSS_HARVESTING: SuggestionRule = SuggestionRule {
    name: "us_crypto_loss_harvesting",
    check: us_crypto_loss_harvesting,
};
pub const GERMANY_CRYPTO_HOLDING: SuggestionRule = SuggestionRule {
    name: "germany_crypto_holding",
    check: germany_crypto_holding,
};
pub const UK_ISA_WRAPPER: SuggestionRule = SuggestionRule {
    name: "uk_isa_wrapper",
    check: uk_isa_wrapper,
};
pub const LOW_TAX_JURISDICTION: SuggestionRule = SuggestionRule {
    name: "low_tax_jurisdiction",
    check: low_tax_jurisdiction,
};
pub const CUSTOM_ORDINARY_INCOME_NOTE: SuggestionRule = SuggestionRule {
    name: "custom_ordinary_income_note",
    check: custom_ordinary_income_note,
};
pub const CUSTOM_BUSINESS_INCOME_NOTE: SuggestionRule = SuggestionRule {
    name: "custom_business_income_note",
    check: custom_business_income_note,
};
pub const EXEMPT_INCOME_NOTE: SuggestionRule = SuggestionRule {
    name: "exempt_income_note",
    check: exempt_income_note,
};

/// Ordered rule list.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    rules: Vec<SuggestionRule>,
}

impl SuggestionEngine {
    pub fn new(rules: Vec<SuggestionRule>) -> Self {
        Self { rules }
    }

    /// The default rule set, in evaluation order.
    pub fn standard() -> Self {
        Self::new(vec![
            HOLD_FOR_LONG_TERM,
            MAXIMIZE_BUSINESS_EXPENSES,
            BALANCE_SALARY_AND_DIVIDENDS,
            RETIREMENT_DEFERRAL,
            US_CRYPTO_LOSS_HARVESTING,
            GERMANY_CRYPTO_HOLDING,
            UK_ISA_WRAPPER,
            LOW_TAX_JURISDICTION,
            CUSTOM_ORDINARY_INCOME_NOTE,
            CUSTOM_BUSINESS_INCOME_NOTE,
            EXEMPT_INCOME_NOTE,
        ])
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn evaluate(
        &self,
        ctx: &SuggestionContext<'_>,
    ) -> Vec<String> {
        self.rules.iter().filter_map(|rule| (rule.check)(ctx)).collect()
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::standard()
    }
}

fn hold_for_long_term(ctx: &SuggestionContext<'_>) -> Option<String> {
    let short_term = ctx.totals.short_term_gains;
    if short_term <= Decimal::ZERO {
        return None;
    }

    let rates = &ctx.config.capital_gains;
    if rates.long_term_rate < rates.short_term_rate {
        let saving = percent_of(short_term, rates.short_term_rate - rates.long_term_rate);
        Some(format!(
            "Holding assets longer could move {} of short-term gains from {}% to the {}% long-term rate, saving about {}.",
            ctx.money(short_term),
            rates.short_term_rate,
            rates.long_term_rate,
            ctx.money(saving)
        ))
    } else {
        Some(format!(
            "You have {} of short-term gains. Review holding periods before selling; timing disposals can spread gains across tax years.",
            ctx.money(short_term)
        ))
    }
}

fn maximize_business_expenses(ctx: &SuggestionContext<'_>) -> Option<String> {
    let business = ctx.totals.business_income;
    if !ctx.entity.allows_pass_through || business <= EXPENSE_REVIEW_THRESHOLD {
        return None;
    }

    let categories = if ctx.entity.deductible_expenses.is_empty() {
        String::from("keep records of every business expense")
    } else {
        format!("claim {}", ctx.entity.deductible_expenses.join(", "))
    };
    Some(format!(
        "{} of business income is taxed at your personal rates as a {}. Maximize deductible expenses: {}.",
        ctx.money(business),
        ctx.entity.entity_type.display_name(),
        categories
    ))
}

fn balance_salary_and_dividends(ctx: &SuggestionContext<'_>) -> Option<String> {
    if ctx.entity.allows_pass_through {
        return None;
    }
    let corporate = ctx.result.corporate_tax.as_ref()?;
    if corporate.amount <= Decimal::ZERO {
        return None;
    }

    Some(format!(
        "Corporate tax of {} applies at {}%. Balancing owner salary against dividends (taxed at {}% on distribution) can lower the combined burden.",
        ctx.money(corporate.amount),
        corporate.rate,
        ctx.entity.profit_distribution_tax
    ))
}

fn retirement_deferral(ctx: &SuggestionContext<'_>) -> Option<String> {
    let marginal = ctx.result.income_tax.marginal_rate;
    if marginal <= HIGH_MARGINAL_RATE {
        return None;
    }

    Some(format!(
        "Your marginal income tax rate is {marginal}%. Contributions to tax-deferred retirement accounts reduce the income taxed at that rate."
    ))
}

fn us_crypto_loss_harvesting(ctx: &SuggestionContext<'_>) -> Option<String> {
    if ctx.config.jurisdiction != Jurisdiction::UnitedStates
        || ctx.input.crypto_gains <= Decimal::ZERO
    {
        return None;
    }

    Some(format!(
        "Crypto gains of {} are taxed as short-term gains. Realizing losses on other positions (tax-loss harvesting) can offset them.",
        ctx.money(ctx.input.crypto_gains)
    ))
}

fn germany_crypto_holding(ctx: &SuggestionContext<'_>) -> Option<String> {
    if ctx.config.jurisdiction != Jurisdiction::Germany || ctx.input.crypto_gains <= Decimal::ZERO {
        return None;
    }

    Some(format!(
        "Private crypto disposals in Germany held for more than one year are generally tax-free. Check holding periods on {} of crypto gains.",
        ctx.money(ctx.input.crypto_gains)
    ))
}

fn uk_isa_wrapper(ctx: &SuggestionContext<'_>) -> Option<String> {
    let investment_income =
        ctx.totals.short_term_gains + ctx.totals.long_term_gains + ctx.totals.dividends;
    if ctx.config.jurisdiction != Jurisdiction::UnitedKingdom || investment_income <= Decimal::ZERO
    {
        return None;
    }

    Some(String::from(
        "Holding investments inside an ISA shelters capital gains and dividends from UK tax.",
    ))
}

fn low_tax_jurisdiction(ctx: &SuggestionContext<'_>) -> Option<String> {
    if !LOW_TAX_JURISDICTIONS.contains(&ctx.config.jurisdiction)
        || ctx.totals.total_income <= Decimal::ZERO
    {
        return None;
    }

    Some(format!(
        "{} does not tax capital gains. Realizing investment gains while resident here maximizes what you keep.",
        ctx.config.jurisdiction.display_name()
    ))
}

fn custom_ordinary_income_note(ctx: &SuggestionContext<'_>) -> Option<String> {
    let ordinary = ctx.totals.custom.ordinary;
    if ordinary <= Decimal::ZERO {
        return None;
    }

    Some(format!(
        "{} of custom income is taxed as ordinary income and counts toward social security contributions.",
        ctx.money(ordinary)
    ))
}

fn custom_business_income_note(ctx: &SuggestionContext<'_>) -> Option<String> {
    let business = ctx.totals.custom.business;
    if business <= Decimal::ZERO {
        return None;
    }

    if ctx.entity.allows_pass_through {
        Some(format!(
            "{} of custom business income passes through to your personal return as a {}.",
            ctx.money(business),
            ctx.entity.entity_type.display_name()
        ))
    } else {
        Some(format!(
            "{} of custom business income is taxed at the {}% corporate rate.",
            ctx.money(business),
            ctx.entity.corporate_rate
        ))
    }
}

fn exempt_income_note(ctx: &SuggestionContext<'_>) -> Option<String> {
    let exempt = ctx.totals.custom.exempt;
    if exempt <= Decimal::ZERO {
        return None;
    }

    Some(format!(
        "{} of income is treated as tax-exempt and excluded from every tax calculation.",
        ctx.money(exempt)
    ))
}
