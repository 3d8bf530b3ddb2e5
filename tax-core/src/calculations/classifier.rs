//! Routes custom income sources into aggregation buckets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CustomIncomeSource, IncomeBucket, TaxCalculationInput};

/// Per-bucket sums of the custom income sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIncome {
    pub ordinary: Decimal,
    pub business: Decimal,
    pub capital_gains: Decimal,
    pub dividends: Decimal,
    pub exempt: Decimal,
}

impl ClassifiedIncome {
    pub fn total(&self) -> Decimal {
        self.ordinary + self.business + self.capital_gains + self.dividends + self.exempt
    }

    pub fn get(
        &self,
        bucket: IncomeBucket,
    ) -> Decimal {
        match bucket {
            IncomeBucket::Ordinary => self.ordinary,
            IncomeBucket::Business => self.business,
            IncomeBucket::CapitalGains => self.capital_gains,
            IncomeBucket::Dividends => self.dividends,
            IncomeBucket::Exempt => self.exempt,
        }
    }

    fn add(
        &mut self,
        bucket: IncomeBucket,
        amount: Decimal,
    ) {
        let slot = match bucket {
            IncomeBucket::Ordinary => &mut self.ordinary,
            IncomeBucket::Business => &mut self.business,
            IncomeBucket::CapitalGains => &mut self.capital_gains,
            IncomeBucket::Dividends => &mut self.dividends,
            IncomeBucket::Exempt => &mut self.exempt,
        };
        *slot += amount;
    }
}

pub struct IncomeClassifier;

impl IncomeClassifier {
    /// Sums every source into the bucket its treatment maps to. Each source
    /// lands in exactly one bucket.
    pub fn classify(sources: &[CustomIncomeSource]) -> ClassifiedIncome {
        sources
            .iter()
            .fold(ClassifiedIncome::default(), |mut acc, source| {
                acc.add(source.tax_treatment.bucket(), source.amount);
                acc
            })
    }
}

/// Income totals feeding the calculators, derived once per calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTotals {
    pub custom: ClassifiedIncome,
    /// Declared short-term gains plus all crypto gains.
    pub short_term_gains: Decimal,
    /// Declared long-term gains plus custom capital-gains sources.
    pub long_term_gains: Decimal,
    pub dividends: Decimal,
    /// Declared plus custom business income.
    pub business_income: Decimal,
    /// Base for the progressive schedule, before deductions.
    pub ordinary_base: Decimal,
    /// Salary plus custom ordinary income.
    pub social_security_base: Decimal,
    pub total_deductions: Decimal,
    pub total_income: Decimal,
}

impl IncomeTotals {
    /// Classifies the custom sources and combines them with the declared
    /// fields. Business income joins the ordinary base only for pass-through
    /// entities; it always counts toward total income.
    pub fn from_input(
        input: &TaxCalculationInput,
        pass_through: bool,
        standard_deduction: Decimal,
    ) -> Self {
        let custom = IncomeClassifier::classify(&input.custom_income_sources);

        let short_term_gains = input.capital_gains.short_term + input.crypto_gains;
        let long_term_gains = input.capital_gains.long_term + custom.capital_gains;
        let dividends = input.dividends + custom.dividends;
        let business_income = input.business_income + custom.business;

        let pass_through_business = if pass_through {
            business_income
        } else {
            Decimal::ZERO
        };
        let ordinary_base =
            input.salary_income + input.rental_income + custom.ordinary + pass_through_business;

        let total_income = input.salary_income
            + input.business_income
            + input.capital_gains.short_term
            + input.capital_gains.long_term
            + input.dividends
            + input.rental_income
            + input.crypto_gains
            + custom.total();

        Self {
            short_term_gains,
            long_term_gains,
            dividends,
            business_income,
            ordinary_base,
            social_security_base: input.salary_income + custom.ordinary,
            total_deductions: standard_deduction + input.deductible_expenses,
            total_income,
            custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{EntityType, IncomeType, Jurisdiction, TaxTreatment};

    fn source(
        amount: Decimal,
        treatment: TaxTreatment,
    ) -> CustomIncomeSource {
        CustomIncomeSource {
            id: format!("{}-{}", treatment.as_str(), amount),
            label: "test".to_string(),
            amount,
            income_type: IncomeType::Other,
            tax_treatment: treatment,
        }
    }

    #[test]
    fn classify_empty_is_all_zero() {
        let result = IncomeClassifier::classify(&[]);

        assert_eq!(result, ClassifiedIncome::default());
        assert_eq!(result.total(), dec!(0));
    }

    #[test]
    fn classify_passive_counts_as_ordinary() {
        let result = IncomeClassifier::classify(&[
            source(dec!(1000), TaxTreatment::OrdinaryIncome),
            source(dec!(500), TaxTreatment::PassiveIncome),
        ]);

        assert_eq!(result.ordinary, dec!(1500));
        assert_eq!(result.total(), dec!(1500));
    }

    #[test]
    fn classify_preferential_counts_as_capital_gains() {
        let result = IncomeClassifier::classify(&[
            source(dec!(2000), TaxTreatment::CapitalGains),
            source(dec!(3000), TaxTreatment::Preferential),
        ]);

        assert_eq!(result.capital_gains, dec!(5000));
    }

    #[test]
    fn classify_routes_each_treatment_once() {
        let sources: Vec<_> = TaxTreatment::all()
            .iter()
            .map(|t| source(dec!(100), *t))
            .collect();

        let result = IncomeClassifier::classify(&sources);

        assert_eq!(result.ordinary, dec!(200));
        assert_eq!(result.capital_gains, dec!(200));
        assert_eq!(result.dividends, dec!(100));
        assert_eq!(result.business, dec!(100));
        assert_eq!(result.exempt, dec!(100));
        assert_eq!(result.total(), dec!(700));
    }

    fn input() -> TaxCalculationInput {
        TaxCalculationInput::new(Jurisdiction::UnitedStates, EntityType::Individual)
    }

    #[test]
    fn totals_fold_crypto_into_short_term() {
        let mut input = input();
        input.capital_gains.short_term = dec!(1000);
        input.crypto_gains = dec!(4000);

        let totals = IncomeTotals::from_input(&input, true, dec!(0));

        assert_eq!(totals.short_term_gains, dec!(5000));
        assert_eq!(totals.long_term_gains, dec!(0));
    }

    #[test]
    fn totals_pass_through_business_joins_ordinary_base() {
        let mut input = input();
        input.salary_income = dec!(50000);
        input.business_income = dec!(20000);
        input.custom_income_sources = vec![source(dec!(5000), TaxTreatment::BusinessIncome)];

        let pass_through = IncomeTotals::from_input(&input, true, dec!(0));
        let corporate = IncomeTotals::from_input(&input, false, dec!(0));

        assert_eq!(pass_through.ordinary_base, dec!(75000));
        assert_eq!(corporate.ordinary_base, dec!(50000));
        assert_eq!(corporate.business_income, dec!(25000));
        assert_eq!(pass_through.total_income, corporate.total_income);
        assert_eq!(corporate.total_income, dec!(75000));
    }

    #[test]
    fn totals_social_security_base_excludes_rental_and_business() {
        let mut input = input();
        input.salary_income = dec!(60000);
        input.rental_income = dec!(12000);
        input.business_income = dec!(8000);
        input.custom_income_sources = vec![source(dec!(3000), TaxTreatment::PassiveIncome)];

        let totals = IncomeTotals::from_input(&input, true, dec!(13850));

        assert_eq!(totals.social_security_base, dec!(63000));
        assert_eq!(totals.ordinary_base, dec!(83000));
        assert_eq!(totals.total_deductions, dec!(13850));
    }

    #[test]
    fn totals_exempt_counts_toward_total_income_only() {
        let mut input = input();
        input.custom_income_sources = vec![source(dec!(10000), TaxTreatment::Exempt)];

        let totals = IncomeTotals::from_input(&input, true, dec!(0));

        assert_eq!(totals.total_income, dec!(10000));
        assert_eq!(totals.ordinary_base, dec!(0));
        assert_eq!(totals.social_security_base, dec!(0));
        assert_eq!(totals.long_term_gains, dec!(0));
        assert_eq!(totals.dividends, dec!(0));
    }

    #[test]
    fn get_reads_bucket() {
        let result = IncomeClassifier::classify(&[source(dec!(42), TaxTreatment::Exempt)]);

        assert_eq!(result.get(IncomeBucket::Exempt), dec!(42));
        assert_eq!(result.get(IncomeBucket::Ordinary), dec!(0));
    }
}
