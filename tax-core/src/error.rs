use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by the tax engine and its registries.
///
/// Configuration variants (`MalformedBracketTable`, `InvalidRate`,
/// `InvalidConfigAmount`, `InvalidCurrency`, `DuplicateRegistryEntry`) come
/// from registry construction; the rest come from lookups and input
/// validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    #[error("unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    #[error("unknown tax treatment '{0}'")]
    UnknownTaxTreatment(String),

    #[error("malformed bracket table for {jurisdiction}: {reason}")]
    MalformedBracketTable { jurisdiction: String, reason: String },

    #[error("{owner}: {field} must be between 0 and 100, got {rate}")]
    InvalidRate {
        owner: String,
        field: &'static str,
        rate: Decimal,
    },

    #[error("{owner}: {field} must not be negative, got {amount}")]
    InvalidConfigAmount {
        owner: String,
        field: &'static str,
        amount: Decimal,
    },

    #[error("invalid currency for {jurisdiction}: {reason}")]
    InvalidCurrency { jurisdiction: String, reason: String },

    #[error("unknown currency '{0}'")]
    UnknownCurrency(String),

    #[error("duplicate registry entry '{0}'")]
    DuplicateRegistryEntry(String),

    #[error("{field} must not be negative, got {amount}")]
    NegativeAmount { field: String, amount: Decimal },

    #[error("{field} exceeds the supported maximum, got {amount}")]
    AmountTooLarge { field: String, amount: Decimal },
}

impl TaxEngineError {
    /// True for errors that indicate broken reference data rather than bad
    /// caller input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedBracketTable { .. }
                | Self::InvalidRate { .. }
                | Self::InvalidConfigAmount { .. }
                | Self::InvalidCurrency { .. }
                | Self::UnknownCurrency(_)
                | Self::DuplicateRegistryEntry(_)
        )
    }
}
