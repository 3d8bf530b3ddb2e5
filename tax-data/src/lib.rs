//! CSV loaders feeding the tax engine: bracket overrides for the
//! jurisdiction registry and custom income sources for a calculation input.

pub mod brackets;
pub mod income;

pub use brackets::{BracketLoader, BracketLoaderError, BracketRecord};
pub use income::{IncomeLoader, IncomeLoaderError, IncomeRecord};
