//! Calculators behind [`crate::TaxEngine`].
//!
//! Each calculator is a small struct over borrowed reference data with a
//! `calculate` method, so it can be exercised without the engine.

pub mod aggregate;
pub mod brackets;
pub mod capital_gains;
pub mod classifier;
pub mod common;
pub mod corporate;
pub mod dividends;
pub mod social_security;
pub mod suggestions;

pub use aggregate::{TaxComponents, TaxTotals, TotalTaxAggregator};
pub use brackets::ProgressiveBracketCalculator;
pub use capital_gains::CapitalGainsCalculator;
pub use classifier::{ClassifiedIncome, IncomeClassifier, IncomeTotals};
pub use corporate::CorporateTaxCalculator;
pub use dividends::DividendTaxCalculator;
pub use social_security::SocialSecurityCalculator;
pub use suggestions::{SuggestionContext, SuggestionEngine, SuggestionRule};
