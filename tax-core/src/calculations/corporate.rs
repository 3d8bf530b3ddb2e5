//! Corporate tax on business income of non-pass-through entities.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_half_up};
use crate::models::{CorporateTax, EntityTaxRule};

#[derive(Debug, Clone)]
pub struct CorporateTaxCalculator<'a> {
    rule: &'a EntityTaxRule,
}

impl<'a> CorporateTaxCalculator<'a> {
    pub fn new(rule: &'a EntityTaxRule) -> Self {
        Self { rule }
    }

    /// Returns `None` when corporate tax does not apply: the entity passes
    /// income through to its owner, or there is no business income.
    pub fn calculate(
        &self,
        business_income: Decimal,
    ) -> Option<CorporateTax> {
        if self.rule.allows_pass_through || business_income <= Decimal::ZERO {
            return None;
        }

        Some(CorporateTax {
            amount: round_half_up(percent_of(business_income, self.rule.corporate_rate)),
            rate: self.rule.corporate_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::EntityType;

    fn rule(
        corporate_rate: Decimal,
        allows_pass_through: bool,
    ) -> EntityTaxRule {
        EntityTaxRule {
            entity_type: EntityType::CCorp,
            corporate_rate,
            owner_salary_taxable: true,
            profit_distribution_tax: dec!(15),
            allows_pass_through,
            deductible_expenses: Vec::new(),
        }
    }

    #[test]
    fn calculate_applies_corporate_rate() {
        let rule = rule(dec!(21), false);
        let result = CorporateTaxCalculator::new(&rule).calculate(dec!(200000));

        assert_eq!(
            result,
            Some(CorporateTax {
                amount: dec!(42000.00),
                rate: dec!(21),
            })
        );
    }

    #[test]
    fn calculate_pass_through_is_absent() {
        let rule = rule(dec!(0), true);
        let result = CorporateTaxCalculator::new(&rule).calculate(dec!(200000));

        assert_eq!(result, None);
    }

    #[test]
    fn calculate_without_business_income_is_absent() {
        let rule = rule(dec!(21), false);

        assert_eq!(CorporateTaxCalculator::new(&rule).calculate(dec!(0)), None);
    }

    #[test]
    fn calculate_zero_rate_is_present_with_zero_amount() {
        let rule = rule(dec!(0), false);
        let result = CorporateTaxCalculator::new(&rule).calculate(dec!(50000));

        assert_eq!(
            result,
            Some(CorporateTax {
                amount: dec!(0),
                rate: dec!(0),
            })
        );
    }
}
