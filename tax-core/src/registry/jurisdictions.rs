//! Built-in jurisdiction table and the registry that serves it.
//!
//! Figures are illustrative approximations of recent single-filer rules and
//! are not tax advice.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::TaxEngineError;
use crate::format::currencies;
use crate::models::{
    CapitalGainsRates, Currency, Deductions, EntityType, Jurisdiction, JurisdictionTaxConfig,
    SocialSecurityConfig, TaxBracket,
};
use crate::registry::validation::{validate_brackets, validate_jurisdiction};

/// Validated, read-only jurisdiction configurations.
#[derive(Debug, Clone)]
pub struct JurisdictionRegistry {
    configs: BTreeMap<Jurisdiction, JurisdictionTaxConfig>,
}

impl JurisdictionRegistry {
    /// Registry over the built-in table for every [`Jurisdiction`].
    pub fn builtin() -> Result<Self, TaxEngineError> {
        Self::from_configs(builtin_configs())
    }

    /// Builds a registry from caller-supplied configurations, validating each.
    ///
    /// # Errors
    ///
    /// * [`TaxEngineError::MalformedBracketTable`],
    ///   [`TaxEngineError::InvalidRate`],
    ///   [`TaxEngineError::InvalidConfigAmount`] or
    ///   [`TaxEngineError::InvalidCurrency`] for a bad configuration.
    /// * [`TaxEngineError::DuplicateRegistryEntry`] when a jurisdiction
    ///   appears twice.
    pub fn from_configs(
        configs: impl IntoIterator<Item = JurisdictionTaxConfig>
    ) -> Result<Self, TaxEngineError> {
        let mut map = BTreeMap::new();
        for config in configs {
            validate_jurisdiction(&config)?;
            let key = config.jurisdiction;
            if map.insert(key, config).is_some() {
                return Err(TaxEngineError::DuplicateRegistryEntry(key.as_str().to_string()));
            }
        }
        debug!(jurisdictions = map.len(), "jurisdiction registry built");
        Ok(Self { configs: map })
    }

    /// Replaces one jurisdiction's schedule, validating the new brackets.
    pub fn with_brackets(
        mut self,
        jurisdiction: Jurisdiction,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, TaxEngineError> {
        validate_brackets(jurisdiction.as_str(), &brackets)?;
        let config = self
            .configs
            .get_mut(&jurisdiction)
            .ok_or_else(|| TaxEngineError::UnknownJurisdiction(jurisdiction.as_str().to_string()))?;
        config.brackets = brackets;
        debug!(%jurisdiction, brackets = config.brackets.len(), "bracket schedule replaced");
        Ok(self)
    }

    pub fn get(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Result<&JurisdictionTaxConfig, TaxEngineError> {
        self.configs
            .get(&jurisdiction)
            .ok_or_else(|| TaxEngineError::UnknownJurisdiction(jurisdiction.as_str().to_string()))
    }

    /// Looks a jurisdiction up by its code.
    pub fn get_by_code(
        &self,
        code: &str,
    ) -> Result<&JurisdictionTaxConfig, TaxEngineError> {
        let jurisdiction = Jurisdiction::parse(code)
            .ok_or_else(|| TaxEngineError::UnknownJurisdiction(code.to_string()))?;
        self.get(jurisdiction)
    }

    pub fn jurisdictions(&self) -> impl Iterator<Item = Jurisdiction> + '_ {
        self.configs.keys().copied()
    }

    pub fn configs(&self) -> impl Iterator<Item = &JurisdictionTaxConfig> {
        self.configs.values()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Turns `(threshold, rate)` pairs into contiguous brackets; each band ends
/// where the next begins and the last is unbounded.
fn schedule(bands: &[(Decimal, Decimal)]) -> Vec<TaxBracket> {
    bands
        .iter()
        .enumerate()
        .map(|(i, &(min, rate))| TaxBracket::new(min, bands.get(i + 1).map(|next| next.0), rate))
        .collect()
}

fn currency(supported: &currencies::Currency) -> Currency {
    Currency::from(supported)
}

fn gains(
    short_term_rate: Decimal,
    long_term_rate: Decimal,
) -> CapitalGainsRates {
    CapitalGainsRates {
        short_term_rate,
        long_term_rate,
    }
}

fn social(
    employee_rate: Decimal,
    employer_rate: Decimal,
    cap: Option<Decimal>,
) -> Option<SocialSecurityConfig> {
    Some(SocialSecurityConfig {
        employee_rate,
        employer_rate,
        cap,
    })
}

fn deductions(
    standard_deduction: Decimal,
    personal_allowance: Decimal,
) -> Deductions {
    Deductions {
        standard_deduction,
        personal_allowance,
    }
}

pub fn builtin_configs() -> Vec<JurisdictionTaxConfig> {
    use EntityType::*;

    vec![
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::UnitedStates,
            currency: currency(currencies::USD),
            brackets: schedule(&[
                (dec!(0), dec!(10)),
                (dec!(11000), dec!(12)),
                (dec!(44725), dec!(22)),
                (dec!(95375), dec!(24)),
                (dec!(182100), dec!(32)),
                (dec!(231250), dec!(35)),
                (dec!(578125), dec!(37)),
            ]),
            capital_gains: gains(dec!(22), dec!(15)),
            dividend_rate: dec!(15),
            vat_gst_rate: dec!(0),
            social_security: social(dec!(7.65), dec!(7.65), Some(dec!(160200))),
            deductions: deductions(dec!(13850), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, Llc, SCorp, CCorp],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::UnitedKingdom,
            currency: currency(currencies::GBP),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(12570), dec!(20)),
                (dec!(50270), dec!(40)),
                (dec!(125140), dec!(45)),
            ]),
            capital_gains: gains(dec!(20), dec!(20)),
            dividend_rate: dec!(33.75),
            vat_gst_rate: dec!(20),
            social_security: social(dec!(12), dec!(13.8), Some(dec!(50270))),
            deductions: deductions(dec!(0), dec!(12570)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, Llp, Ltd],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Canada,
            currency: currency(currencies::CAD),
            brackets: schedule(&[
                (dec!(0), dec!(15)),
                (dec!(53359), dec!(20.5)),
                (dec!(106717), dec!(26)),
                (dec!(165430), dec!(29)),
                (dec!(235675), dec!(33)),
            ]),
            capital_gains: gains(dec!(26), dec!(13)),
            dividend_rate: dec!(15),
            vat_gst_rate: dec!(5),
            social_security: social(dec!(5.95), dec!(5.95), Some(dec!(66600))),
            deductions: deductions(dec!(15000), dec!(15000)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, Ccpc],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Germany,
            currency: currency(currencies::EUR),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(10908), dec!(24)),
                (dec!(62810), dec!(42)),
                (dec!(277826), dec!(45)),
            ]),
            capital_gains: gains(dec!(26.375), dec!(26.375)),
            dividend_rate: dec!(26.375),
            vat_gst_rate: dec!(19),
            social_security: social(dec!(20), dec!(20), Some(dec!(90600))),
            deductions: deductions(dec!(1230), dec!(10908)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, Gmbh],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::France,
            currency: currency(currencies::EUR),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(11294), dec!(11)),
                (dec!(28797), dec!(30)),
                (dec!(82341), dec!(41)),
                (dec!(177106), dec!(45)),
            ]),
            capital_gains: gains(dec!(30), dec!(30)),
            dividend_rate: dec!(30),
            vat_gst_rate: dec!(20),
            social_security: social(dec!(22), dec!(45), None),
            deductions: deductions(dec!(0), dec!(11294)),
            available_entity_types: vec![Individual, SoleProprietorship, Sarl, Sas],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Australia,
            currency: currency(currencies::AUD),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(18200), dec!(19)),
                (dec!(45000), dec!(32.5)),
                (dec!(120000), dec!(37)),
                (dec!(180000), dec!(45)),
            ]),
            capital_gains: gains(dec!(32.5), dec!(16.25)),
            dividend_rate: dec!(25),
            vat_gst_rate: dec!(10),
            social_security: social(dec!(2), dec!(11), None),
            deductions: deductions(dec!(0), dec!(18200)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, PtyLtd],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Singapore,
            currency: currency(currencies::SGD),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(20000), dec!(2)),
                (dec!(30000), dec!(3.5)),
                (dec!(40000), dec!(7)),
                (dec!(80000), dec!(11.5)),
                (dec!(120000), dec!(15)),
                (dec!(160000), dec!(18)),
                (dec!(200000), dec!(19)),
                (dec!(240000), dec!(19.5)),
                (dec!(280000), dec!(20)),
                (dec!(320000), dec!(22)),
            ]),
            capital_gains: gains(dec!(0), dec!(0)),
            dividend_rate: dec!(0),
            vat_gst_rate: dec!(9),
            social_security: social(dec!(20), dec!(17), Some(dec!(81600))),
            deductions: deductions(dec!(1000), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, PteLtd],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::UnitedArabEmirates,
            currency: currency(currencies::AED),
            brackets: schedule(&[(dec!(0), dec!(0))]),
            capital_gains: gains(dec!(0), dec!(0)),
            dividend_rate: dec!(0),
            vat_gst_rate: dec!(5),
            social_security: None,
            deductions: deductions(dec!(0), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, FreeZoneCompany],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Switzerland,
            currency: currency(currencies::CHF),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(14500), dec!(0.77)),
                (dec!(31600), dec!(0.88)),
                (dec!(41400), dec!(2.64)),
                (dec!(55200), dec!(2.97)),
                (dec!(72500), dec!(5.94)),
                (dec!(78100), dec!(6.6)),
                (dec!(103600), dec!(8.8)),
                (dec!(134600), dec!(11)),
                (dec!(176000), dec!(13.2)),
            ]),
            capital_gains: gains(dec!(0), dec!(0)),
            dividend_rate: dec!(35),
            vat_gst_rate: dec!(8.1),
            social_security: social(dec!(5.3), dec!(5.3), None),
            deductions: deductions(dec!(0), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Gmbh, Ag],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Netherlands,
            currency: currency(currencies::EUR),
            brackets: schedule(&[(dec!(0), dec!(36.93)), (dec!(73031), dec!(49.5))]),
            capital_gains: gains(dec!(32), dec!(32)),
            dividend_rate: dec!(15),
            vat_gst_rate: dec!(21),
            social_security: None,
            deductions: deductions(dec!(0), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Bv],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Japan,
            currency: currency(currencies::JPY),
            brackets: schedule(&[
                (dec!(0), dec!(5)),
                (dec!(1950000), dec!(10)),
                (dec!(3300000), dec!(20)),
                (dec!(6950000), dec!(23)),
                (dec!(9000000), dec!(33)),
                (dec!(18000000), dec!(40)),
                (dec!(40000000), dec!(45)),
            ]),
            capital_gains: gains(dec!(20.315), dec!(20.315)),
            dividend_rate: dec!(20.315),
            vat_gst_rate: dec!(10),
            social_security: social(dec!(15), dec!(15), Some(dec!(15000000))),
            deductions: deductions(dec!(480000), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, KabushikiKaisha],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::India,
            currency: currency(currencies::INR),
            brackets: schedule(&[
                (dec!(0), dec!(0)),
                (dec!(300000), dec!(5)),
                (dec!(700000), dec!(10)),
                (dec!(1000000), dec!(15)),
                (dec!(1200000), dec!(20)),
                (dec!(1500000), dec!(30)),
            ]),
            capital_gains: gains(dec!(15), dec!(10)),
            dividend_rate: dec!(20),
            vat_gst_rate: dec!(18),
            social_security: social(dec!(12), dec!(12), Some(dec!(180000))),
            deductions: deductions(dec!(50000), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, PrivateLimited],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Ireland,
            currency: currency(currencies::EUR),
            brackets: schedule(&[(dec!(0), dec!(20)), (dec!(42000), dec!(40))]),
            capital_gains: gains(dec!(33), dec!(33)),
            dividend_rate: dec!(40),
            vat_gst_rate: dec!(23),
            social_security: social(dec!(4), dec!(11.05), None),
            deductions: deductions(dec!(0), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, Ltd],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::Portugal,
            currency: currency(currencies::EUR),
            brackets: schedule(&[
                (dec!(0), dec!(13.25)),
                (dec!(7703), dec!(18)),
                (dec!(11623), dec!(23)),
                (dec!(16472), dec!(26)),
                (dec!(21321), dec!(32.75)),
                (dec!(27146), dec!(37)),
                (dec!(39791), dec!(43.5)),
                (dec!(51997), dec!(45)),
                (dec!(81199), dec!(48)),
            ]),
            capital_gains: gains(dec!(28), dec!(28)),
            dividend_rate: dec!(28),
            vat_gst_rate: dec!(23),
            social_security: social(dec!(11), dec!(23.75), None),
            deductions: deductions(dec!(4104), dec!(0)),
            available_entity_types: vec![Individual, SoleProprietorship, Lda],
        },
        JurisdictionTaxConfig {
            jurisdiction: Jurisdiction::HongKong,
            currency: currency(currencies::HKD),
            brackets: schedule(&[
                (dec!(0), dec!(2)),
                (dec!(50000), dec!(6)),
                (dec!(100000), dec!(10)),
                (dec!(150000), dec!(14)),
                (dec!(200000), dec!(17)),
            ]),
            capital_gains: gains(dec!(0), dec!(0)),
            dividend_rate: dec!(0),
            vat_gst_rate: dec!(0),
            social_security: social(dec!(5), dec!(5), Some(dec!(360000))),
            deductions: deductions(dec!(132000), dec!(132000)),
            available_entity_types: vec![Individual, SoleProprietorship, Partnership, Ltd],
        },
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_covers_every_jurisdiction() {
        let registry = JurisdictionRegistry::builtin().unwrap();

        assert_eq!(registry.len(), Jurisdiction::all().len());
        for jurisdiction in Jurisdiction::all() {
            assert!(registry.get(*jurisdiction).is_ok(), "missing {jurisdiction}");
        }
    }

    #[test]
    fn builtin_tables_offer_individual_everywhere() {
        let registry = JurisdictionRegistry::builtin().unwrap();

        for config in registry.configs() {
            assert!(config.offers_entity_type(EntityType::Individual));
        }
    }

    #[test]
    fn schedule_links_bands() {
        let brackets = schedule(&[(dec!(0), dec!(10)), (dec!(100), dec!(20))]);

        assert_eq!(
            brackets,
            vec![
                TaxBracket::new(dec!(0), Some(dec!(100)), dec!(10)),
                TaxBracket::new(dec!(100), None, dec!(20)),
            ]
        );
    }

    #[test]
    fn usa_reference_values() {
        let registry = JurisdictionRegistry::builtin().unwrap();
        let usa = registry.get(Jurisdiction::UnitedStates).unwrap();

        assert_eq!(usa.deductions.standard_deduction, dec!(13850));
        assert_eq!(usa.top_marginal_rate(), dec!(37));
        assert_eq!(
            usa.brackets[3],
            TaxBracket::new(dec!(95375), Some(dec!(182100)), dec!(24))
        );
    }

    #[test]
    fn get_by_code_rejects_unknown_code() {
        let registry = JurisdictionRegistry::builtin().unwrap();

        assert_eq!(
            registry.get_by_code("XX").unwrap_err(),
            TaxEngineError::UnknownJurisdiction("XX".to_string())
        );
        assert_eq!(
            registry.get_by_code("sg").unwrap().jurisdiction,
            Jurisdiction::Singapore
        );
    }

    #[test]
    fn get_missing_jurisdiction_fails() {
        let registry = JurisdictionRegistry::from_configs(
            builtin_configs()
                .into_iter()
                .filter(|c| c.jurisdiction != Jurisdiction::Japan),
        )
        .unwrap();

        assert_eq!(
            registry.get(Jurisdiction::Japan).unwrap_err(),
            TaxEngineError::UnknownJurisdiction("JP".to_string())
        );
    }

    #[test]
    fn from_configs_rejects_duplicates() {
        let mut configs = builtin_configs();
        configs.push(configs[0].clone());

        assert_eq!(
            JurisdictionRegistry::from_configs(configs).unwrap_err(),
            TaxEngineError::DuplicateRegistryEntry("USA".to_string())
        );
    }

    #[test]
    fn from_configs_rejects_malformed_brackets() {
        let mut configs = builtin_configs();
        configs[0].brackets.swap(1, 2);

        let err = JurisdictionRegistry::from_configs(configs).unwrap_err();

        assert!(err.is_configuration_error());
        assert!(matches!(err, TaxEngineError::MalformedBracketTable { .. }));
    }

    #[test]
    fn from_configs_rejects_out_of_range_rate() {
        let mut configs = builtin_configs();
        configs[1].dividend_rate = dec!(150);

        assert_eq!(
            JurisdictionRegistry::from_configs(configs).unwrap_err(),
            TaxEngineError::InvalidRate {
                owner: "UK".to_string(),
                field: "dividend_rate",
                rate: dec!(150),
            }
        );
    }

    #[test]
    fn from_configs_rejects_negative_social_security_cap() {
        let mut configs = builtin_configs();
        if let Some(social) = configs[0].social_security.as_mut() {
            social.cap = Some(dec!(-160200));
        }

        assert_eq!(
            JurisdictionRegistry::from_configs(configs).unwrap_err(),
            TaxEngineError::InvalidConfigAmount {
                owner: "USA".to_string(),
                field: "social_security.cap",
                amount: dec!(-160200),
            }
        );
    }

    #[test]
    fn from_configs_rejects_negative_deductions() {
        let mut configs = builtin_configs();
        configs[2].deductions.standard_deduction = dec!(-15000);

        assert_eq!(
            JurisdictionRegistry::from_configs(configs).unwrap_err(),
            TaxEngineError::InvalidConfigAmount {
                owner: "CA".to_string(),
                field: "standard_deduction",
                amount: dec!(-15000),
            }
        );

        let mut configs = builtin_configs();
        configs[2].deductions.personal_allowance = dec!(-1);

        assert_eq!(
            JurisdictionRegistry::from_configs(configs).unwrap_err(),
            TaxEngineError::InvalidConfigAmount {
                owner: "CA".to_string(),
                field: "personal_allowance",
                amount: dec!(-1),
            }
        );
    }

    #[test]
    fn from_configs_rejects_mismatched_currency_symbol() {
        let mut configs = builtin_configs();
        configs[1].currency.symbol = "$".to_string();

        let err = JurisdictionRegistry::from_configs(configs).unwrap_err();

        assert!(err.is_configuration_error());
        assert!(matches!(err, TaxEngineError::InvalidCurrency { jurisdiction, .. } if jurisdiction == "UK"));
    }

    #[test]
    fn with_brackets_replaces_schedule() {
        let flat = vec![TaxBracket::new(dec!(0), None, dec!(10))];
        let registry = JurisdictionRegistry::builtin()
            .unwrap()
            .with_brackets(Jurisdiction::UnitedArabEmirates, flat.clone())
            .unwrap();

        assert_eq!(
            registry.get(Jurisdiction::UnitedArabEmirates).unwrap().brackets,
            flat
        );
    }

    #[test]
    fn with_brackets_validates_replacement() {
        let broken = vec![TaxBracket::new(dec!(0), Some(dec!(100)), dec!(10))];
        let result = JurisdictionRegistry::builtin()
            .unwrap()
            .with_brackets(Jurisdiction::UnitedStates, broken);

        assert!(matches!(
            result,
            Err(TaxEngineError::MalformedBracketTable { .. })
        ));
    }
}
