use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax treatment attached to a custom income source.
///
/// The treatment, not the [`IncomeType`], decides where a source is taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxTreatment {
    OrdinaryIncome,
    CapitalGains,
    QualifiedDividends,
    PassiveIncome,
    BusinessIncome,
    Exempt,
    Preferential,
}

/// Aggregation bucket a custom source is summed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBucket {
    Ordinary,
    Business,
    CapitalGains,
    Dividends,
    Exempt,
}

impl TaxTreatment {
    pub fn all() -> &'static [TaxTreatment] {
        &[
            Self::OrdinaryIncome,
            Self::CapitalGains,
            Self::QualifiedDividends,
            Self::PassiveIncome,
            Self::BusinessIncome,
            Self::Exempt,
            Self::Preferential,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrdinaryIncome => "ordinary_income",
            Self::CapitalGains => "capital_gains",
            Self::QualifiedDividends => "qualified_dividends",
            Self::PassiveIncome => "passive_income",
            Self::BusinessIncome => "business_income",
            Self::Exempt => "exempt",
            Self::Preferential => "preferential",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(code))
    }

    /// Routing table for custom sources. Passive income is taxed as
    /// ordinary income; preferential income is taxed like long-term gains.
    pub fn bucket(&self) -> IncomeBucket {
        match self {
            Self::OrdinaryIncome | Self::PassiveIncome => IncomeBucket::Ordinary,
            Self::CapitalGains | Self::Preferential => IncomeBucket::CapitalGains,
            Self::QualifiedDividends => IncomeBucket::Dividends,
            Self::BusinessIncome => IncomeBucket::Business,
            Self::Exempt => IncomeBucket::Exempt,
        }
    }
}

/// Descriptive tag for a custom income source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    Salary,
    Bonus,
    Commission,
    Freelance,
    Consulting,
    BusinessProfit,
    PartnershipDistribution,
    Rental,
    Royalties,
    Interest,
    QualifiedDividends,
    OrdinaryDividends,
    StockSale,
    RealEstateSale,
    CryptoTrading,
    CryptoStaking,
    CryptoMining,
    Nft,
    Pension,
    Annuity,
    SocialSecurityBenefits,
    Alimony,
    Gambling,
    Inheritance,
    Gift,
    Scholarship,
    MunicipalBondInterest,
    Other,
}

impl IncomeType {
    pub fn all() -> &'static [IncomeType] {
        &[
            Self::Salary,
            Self::Bonus,
            Self::Commission,
            Self::Freelance,
            Self::Consulting,
            Self::BusinessProfit,
            Self::PartnershipDistribution,
            Self::Rental,
            Self::Royalties,
            Self::Interest,
            Self::QualifiedDividends,
            Self::OrdinaryDividends,
            Self::StockSale,
            Self::RealEstateSale,
            Self::CryptoTrading,
            Self::CryptoStaking,
            Self::CryptoMining,
            Self::Nft,
            Self::Pension,
            Self::Annuity,
            Self::SocialSecurityBenefits,
            Self::Alimony,
            Self::Gambling,
            Self::Inheritance,
            Self::Gift,
            Self::Scholarship,
            Self::MunicipalBondInterest,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Bonus => "bonus",
            Self::Commission => "commission",
            Self::Freelance => "freelance",
            Self::Consulting => "consulting",
            Self::BusinessProfit => "business_profit",
            Self::PartnershipDistribution => "partnership_distribution",
            Self::Rental => "rental",
            Self::Royalties => "royalties",
            Self::Interest => "interest",
            Self::QualifiedDividends => "qualified_dividends",
            Self::OrdinaryDividends => "ordinary_dividends",
            Self::StockSale => "stock_sale",
            Self::RealEstateSale => "real_estate_sale",
            Self::CryptoTrading => "crypto_trading",
            Self::CryptoStaking => "crypto_staking",
            Self::CryptoMining => "crypto_mining",
            Self::Nft => "nft",
            Self::Pension => "pension",
            Self::Annuity => "annuity",
            Self::SocialSecurityBenefits => "social_security_benefits",
            Self::Alimony => "alimony",
            Self::Gambling => "gambling",
            Self::Inheritance => "inheritance",
            Self::Gift => "gift",
            Self::Scholarship => "scholarship",
            Self::MunicipalBondInterest => "municipal_bond_interest",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(code))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Bonus => "Bonus",
            Self::Commission => "Commission",
            Self::Freelance => "Freelance",
            Self::Consulting => "Consulting",
            Self::BusinessProfit => "Business Profit",
            Self::PartnershipDistribution => "Partnership Distribution",
            Self::Rental => "Rental Income",
            Self::Royalties => "Royalties",
            Self::Interest => "Interest",
            Self::QualifiedDividends => "Qualified Dividends",
            Self::OrdinaryDividends => "Ordinary Dividends",
            Self::StockSale => "Stock Sale",
            Self::RealEstateSale => "Real Estate Sale",
            Self::CryptoTrading => "Crypto Trading",
            Self::CryptoStaking => "Crypto Staking",
            Self::CryptoMining => "Crypto Mining",
            Self::Nft => "NFT Sales",
            Self::Pension => "Pension",
            Self::Annuity => "Annuity",
            Self::SocialSecurityBenefits => "Social Security Benefits",
            Self::Alimony => "Alimony",
            Self::Gambling => "Gambling Winnings",
            Self::Inheritance => "Inheritance",
            Self::Gift => "Gift",
            Self::Scholarship => "Scholarship",
            Self::MunicipalBondInterest => "Municipal Bond Interest",
            Self::Other => "Other",
        }
    }

    /// Treatment assumed when a caller declares the type but not the
    /// treatment.
    pub fn default_treatment(&self) -> TaxTreatment {
        match self {
            Self::Salary
            | Self::Bonus
            | Self::Commission
            | Self::Interest
            | Self::OrdinaryDividends
            | Self::CryptoStaking
            | Self::CryptoMining
            | Self::Pension
            | Self::Annuity
            | Self::SocialSecurityBenefits
            | Self::Alimony
            | Self::Gambling
            | Self::Other => TaxTreatment::OrdinaryIncome,
            Self::Freelance
            | Self::Consulting
            | Self::BusinessProfit
            | Self::PartnershipDistribution => TaxTreatment::BusinessIncome,
            Self::Rental | Self::Royalties => TaxTreatment::PassiveIncome,
            Self::QualifiedDividends => TaxTreatment::QualifiedDividends,
            Self::StockSale | Self::CryptoTrading | Self::Nft => TaxTreatment::CapitalGains,
            Self::RealEstateSale => TaxTreatment::Preferential,
            Self::Inheritance
            | Self::Gift
            | Self::Scholarship
            | Self::MunicipalBondInterest => TaxTreatment::Exempt,
        }
    }
}

/// A caller-declared income item outside the standard input fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomIncomeSource {
    pub id: String,
    pub label: String,
    pub amount: Decimal,
    pub income_type: IncomeType,
    pub tax_treatment: TaxTreatment,
}

impl CustomIncomeSource {
    /// Builds a source using the income type's default treatment.
    pub fn with_default_treatment(
        id: impl Into<String>,
        label: impl Into<String>,
        amount: Decimal,
        income_type: IncomeType,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            amount,
            income_type,
            tax_treatment: income_type.default_treatment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bucket_routes_every_treatment() {
        assert_eq!(TaxTreatment::OrdinaryIncome.bucket(), IncomeBucket::Ordinary);
        assert_eq!(TaxTreatment::PassiveIncome.bucket(), IncomeBucket::Ordinary);
        assert_eq!(TaxTreatment::CapitalGains.bucket(), IncomeBucket::CapitalGains);
        assert_eq!(TaxTreatment::Preferential.bucket(), IncomeBucket::CapitalGains);
        assert_eq!(TaxTreatment::QualifiedDividends.bucket(), IncomeBucket::Dividends);
        assert_eq!(TaxTreatment::BusinessIncome.bucket(), IncomeBucket::Business);
        assert_eq!(TaxTreatment::Exempt.bucket(), IncomeBucket::Exempt);
    }

    #[test]
    fn treatment_parse_round_trips() {
        for treatment in TaxTreatment::all() {
            assert_eq!(TaxTreatment::parse(treatment.as_str()), Some(*treatment));
        }
        assert_eq!(TaxTreatment::parse("tax_free"), None);
    }

    #[test]
    fn income_type_parse_round_trips() {
        for income_type in IncomeType::all() {
            assert_eq!(IncomeType::parse(income_type.as_str()), Some(*income_type));
        }
    }

    #[test]
    fn default_treatment_for_common_types() {
        assert_eq!(IncomeType::Salary.default_treatment(), TaxTreatment::OrdinaryIncome);
        assert_eq!(IncomeType::Freelance.default_treatment(), TaxTreatment::BusinessIncome);
        assert_eq!(IncomeType::Gift.default_treatment(), TaxTreatment::Exempt);
        assert_eq!(IncomeType::RealEstateSale.default_treatment(), TaxTreatment::Preferential);
    }

    #[test]
    fn with_default_treatment_uses_income_type() {
        let source = CustomIncomeSource::with_default_treatment(
            "r1",
            "Flat on Main St",
            dec!(12000),
            IncomeType::Rental,
        );

        assert_eq!(source.tax_treatment, TaxTreatment::PassiveIncome);
        assert_eq!(source.amount, dec!(12000));
    }
}
