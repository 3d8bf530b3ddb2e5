//! Built-in entity tax rules and their registry.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::TaxEngineError;
use crate::models::{EntityTaxRule, EntityType};
use crate::registry::validation::validate_entity_rule;

const SMALL_BUSINESS_EXPENSES: &[&str] = &[
    "Office rent",
    "Equipment",
    "Software subscriptions",
    "Business travel",
    "Professional fees",
    "Home office",
];

const COMPANY_EXPENSES: &[&str] = &[
    "Salaries",
    "Office rent",
    "Equipment depreciation",
    "Software subscriptions",
    "Business travel",
    "Professional fees",
    "Pension contributions",
];

#[derive(Debug, Clone)]
pub struct EntityRuleRegistry {
    rules: BTreeMap<EntityType, EntityTaxRule>,
}

impl EntityRuleRegistry {
    pub fn builtin() -> Result<Self, TaxEngineError> {
        Self::from_rules(builtin_rules())
    }

    pub fn from_rules(
        rules: impl IntoIterator<Item = EntityTaxRule>
    ) -> Result<Self, TaxEngineError> {
        let mut map = BTreeMap::new();
        for rule in rules {
            validate_entity_rule(&rule)?;
            let key = rule.entity_type;
            if map.insert(key, rule).is_some() {
                return Err(TaxEngineError::DuplicateRegistryEntry(key.as_str().to_string()));
            }
        }
        debug!(entity_types = map.len(), "entity rule registry built");
        Ok(Self { rules: map })
    }

    pub fn get(
        &self,
        entity_type: EntityType,
    ) -> Result<&EntityTaxRule, TaxEngineError> {
        self.rules
            .get(&entity_type)
            .ok_or_else(|| TaxEngineError::UnknownEntityType(entity_type.as_str().to_string()))
    }

    pub fn get_by_code(
        &self,
        code: &str,
    ) -> Result<&EntityTaxRule, TaxEngineError> {
        let entity_type = EntityType::parse(code)
            .ok_or_else(|| TaxEngineError::UnknownEntityType(code.to_string()))?;
        self.get(entity_type)
    }

    pub fn contains(
        &self,
        entity_type: EntityType,
    ) -> bool {
        self.rules.contains_key(&entity_type)
    }

    pub fn rules(&self) -> impl Iterator<Item = &EntityTaxRule> {
        self.rules.values()
    }
}

fn pass_through(entity_type: EntityType) -> EntityTaxRule {
    EntityTaxRule {
        entity_type,
        corporate_rate: Decimal::ZERO,
        owner_salary_taxable: true,
        profit_distribution_tax: Decimal::ZERO,
        allows_pass_through: true,
        deductible_expenses: names(SMALL_BUSINESS_EXPENSES),
    }
}

fn company(
    entity_type: EntityType,
    corporate_rate: Decimal,
    profit_distribution_tax: Decimal,
) -> EntityTaxRule {
    EntityTaxRule {
        entity_type,
        corporate_rate,
        owner_salary_taxable: true,
        profit_distribution_tax,
        allows_pass_through: false,
        deductible_expenses: names(COMPANY_EXPENSES),
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn builtin_rules() -> Vec<EntityTaxRule> {
    use EntityType::*;

    vec![
        EntityTaxRule {
            deductible_expenses: Vec::new(),
            ..pass_through(Individual)
        },
        pass_through(SoleProprietorship),
        pass_through(Partnership),
        pass_through(Llc),
        pass_through(SCorp),
        pass_through(Llp),
        company(CCorp, dec!(21), dec!(15)),
        company(Ltd, dec!(25), dec!(33.75)),
        company(Gmbh, dec!(30), dec!(26.375)),
        company(Sarl, dec!(25), dec!(30)),
        company(Sas, dec!(25), dec!(30)),
        company(PtyLtd, dec!(25), dec!(0)),
        company(PteLtd, dec!(17), dec!(0)),
        company(FreeZoneCompany, dec!(0), dec!(0)),
        company(Bv, dec!(25.8), dec!(15)),
        company(KabushikiKaisha, dec!(30.62), dec!(20.315)),
        company(PrivateLimited, dec!(25.17), dec!(20)),
        company(Ccpc, dec!(12.2), dec!(15)),
        company(Ag, dec!(14.6), dec!(35)),
        company(Lda, dec!(21), dec!(28)),
    ]
}
