//! Immutable reference data: per-jurisdiction configuration and per-entity
//! tax rules. Both registries validate their contents on construction.

mod entities;
mod jurisdictions;
mod validation;

pub use entities::{EntityRuleRegistry, builtin_rules};
pub use jurisdictions::{JurisdictionRegistry, builtin_configs};
