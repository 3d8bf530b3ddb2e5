use serde::{Deserialize, Serialize};

/// A supported tax jurisdiction.
///
/// Codes are stable and appear in profiles, CSV overrides and CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "USA")]
    UnitedStates,
    #[serde(rename = "UK")]
    UnitedKingdom,
    #[serde(rename = "CA")]
    Canada,
    #[serde(rename = "DE")]
    Germany,
    #[serde(rename = "FR")]
    France,
    #[serde(rename = "AU")]
    Australia,
    #[serde(rename = "SG")]
    Singapore,
    #[serde(rename = "AE")]
    UnitedArabEmirates,
    #[serde(rename = "CH")]
    Switzerland,
    #[serde(rename = "NL")]
    Netherlands,
    #[serde(rename = "JP")]
    Japan,
    #[serde(rename = "IN")]
    India,
    #[serde(rename = "IE")]
    Ireland,
    #[serde(rename = "PT")]
    Portugal,
    #[serde(rename = "HK")]
    HongKong,
}

impl Jurisdiction {
    pub fn all() -> &'static [Jurisdiction] {
        &[
            Self::UnitedStates,
            Self::UnitedKingdom,
            Self::Canada,
            Self::Germany,
            Self::France,
            Self::Australia,
            Self::Singapore,
            Self::UnitedArabEmirates,
            Self::Switzerland,
            Self::Netherlands,
            Self::Japan,
            Self::India,
            Self::Ireland,
            Self::Portugal,
            Self::HongKong,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitedStates => "USA",
            Self::UnitedKingdom => "UK",
            Self::Canada => "CA",
            Self::Germany => "DE",
            Self::France => "FR",
            Self::Australia => "AU",
            Self::Singapore => "SG",
            Self::UnitedArabEmirates => "AE",
            Self::Switzerland => "CH",
            Self::Netherlands => "NL",
            Self::Japan => "JP",
            Self::India => "IN",
            Self::Ireland => "IE",
            Self::Portugal => "PT",
            Self::HongKong => "HK",
        }
    }

    /// Parses a jurisdiction code. Matching ignores ASCII case and
    /// surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|j| j.as_str().eq_ignore_ascii_case(code))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::UnitedKingdom => "United Kingdom",
            Self::Canada => "Canada",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::Australia => "Australia",
            Self::Singapore => "Singapore",
            Self::UnitedArabEmirates => "United Arab Emirates",
            Self::Switzerland => "Switzerland",
            Self::Netherlands => "Netherlands",
            Self::Japan => "Japan",
            Self::India => "India",
            Self::Ireland => "Ireland",
            Self::Portugal => "Portugal",
            Self::HongKong => "Hong Kong",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
