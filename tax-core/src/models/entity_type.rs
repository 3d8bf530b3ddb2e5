use serde::{Deserialize, Serialize};

/// Legal form under which income is earned.
///
/// Rules per entity type live in [`crate::registry::EntityRuleRegistry`];
/// which types a jurisdiction offers lives on its
/// [`crate::JurisdictionTaxConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Individual,
    SoleProprietorship,
    Partnership,
    Llc,
    SCorp,
    CCorp,
    Ltd,
    Llp,
    Gmbh,
    Sarl,
    Sas,
    PtyLtd,
    PteLtd,
    FreeZoneCompany,
    Bv,
    KabushikiKaisha,
    PrivateLimited,
    Ccpc,
    Ag,
    Lda,
}

impl EntityType {
    pub fn all() -> &'static [EntityType] {
        &[
            Self::Individual,
            Self::SoleProprietorship,
            Self::Partnership,
            Self::Llc,
            Self::SCorp,
            Self::CCorp,
            Self::Ltd,
            Self::Llp,
            Self::Gmbh,
            Self::Sarl,
            Self::Sas,
            Self::PtyLtd,
            Self::PteLtd,
            Self::FreeZoneCompany,
            Self::Bv,
            Self::KabushikiKaisha,
            Self::PrivateLimited,
            Self::Ccpc,
            Self::Ag,
            Self::Lda,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::SoleProprietorship => "sole_proprietorship",
            Self::Partnership => "partnership",
            Self::Llc => "llc",
            Self::SCorp => "s_corp",
            Self::CCorp => "c_corp",
            Self::Ltd => "ltd",
            Self::Llp => "llp",
            Self::Gmbh => "gmbh",
            Self::Sarl => "sarl",
            Self::Sas => "sas",
            Self::PtyLtd => "pty_ltd",
            Self::PteLtd => "pte_ltd",
            Self::FreeZoneCompany => "free_zone_company",
            Self::Bv => "bv",
            Self::KabushikiKaisha => "kabushiki_kaisha",
            Self::PrivateLimited => "private_limited",
            Self::Ccpc => "ccpc",
            Self::Ag => "ag",
            Self::Lda => "lda",
        }
    }

    /// Parses an entity type code, ignoring ASCII case. Hyphens are
    /// accepted in place of underscores (`s-corp`).
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(&code))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::SoleProprietorship => "Sole Proprietorship",
            Self::Partnership => "Partnership",
            Self::Llc => "Limited Liability Company (LLC)",
            Self::SCorp => "S Corporation",
            Self::CCorp => "C Corporation",
            Self::Ltd => "Private Limited Company (Ltd)",
            Self::Llp => "Limited Liability Partnership (LLP)",
            Self::Gmbh => "GmbH",
            Self::Sarl => "SARL",
            Self::Sas => "SAS",
            Self::PtyLtd => "Proprietary Limited (Pty Ltd)",
            Self::PteLtd => "Private Limited (Pte Ltd)",
            Self::FreeZoneCompany => "Free Zone Company",
            Self::Bv => "Besloten Vennootschap (BV)",
            Self::KabushikiKaisha => "Kabushiki Kaisha (KK)",
            Self::PrivateLimited => "Private Limited Company (Pvt Ltd)",
            Self::Ccpc => "Canadian-Controlled Private Corporation (CCPC)",
            Self::Ag => "Aktiengesellschaft (AG)",
            Self::Lda => "Sociedade por Quotas (Lda)",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for entity in EntityType::all() {
            assert_eq!(EntityType::parse(entity.as_str()), Some(*entity));
        }
    }

    #[test]
    fn parse_accepts_hyphens_and_upper_case() {
        assert_eq!(EntityType::parse("S-Corp"), Some(EntityType::SCorp));
        assert_eq!(EntityType::parse("PTE_LTD"), Some(EntityType::PteLtd));
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(EntityType::parse("trust"), None);
    }

    #[test]
    fn serde_matches_as_str() {
        for entity in EntityType::all() {
            let json = serde_json::to_string(entity).unwrap();
            assert_eq!(json, format!("\"{}\"", entity.as_str()));
        }
    }
}
