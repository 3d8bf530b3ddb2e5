use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::registry::JurisdictionRegistry;
use tax_core::{Jurisdiction, TaxBracket, TaxEngineError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading bracket overrides.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: unknown jurisdiction '{code}'")]
    UnknownJurisdiction { row: usize, code: String },

    #[error("rejected bracket table: {0}")]
    Registry(#[from] TaxEngineError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket override CSV file.
///
/// - `jurisdiction`: jurisdiction code (e.g., `USA`, `UK`)
/// - `min_income`: lower bound of the band
/// - `max_income`: upper bound of the band (empty for unbounded)
/// - `rate`: marginal rate as a percentage (e.g., `22` for 22%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub jurisdiction: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket overrides.
///
/// Each jurisdiction named in the file has its whole schedule replaced by
/// the rows given for it, in file order. Jurisdictions not named keep their
/// built-in schedule.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups records into one schedule per jurisdiction.
    ///
    /// Row numbers in errors are 1-based and do not count the header.
    pub fn group(
        records: &[BracketRecord]
    ) -> Result<BTreeMap<Jurisdiction, Vec<TaxBracket>>, BracketLoaderError> {
        let mut groups: BTreeMap<Jurisdiction, Vec<TaxBracket>> = BTreeMap::new();

        for (index, record) in records.iter().enumerate() {
            let jurisdiction = Jurisdiction::parse(&record.jurisdiction).ok_or_else(|| {
                BracketLoaderError::UnknownJurisdiction {
                    row: index + 1,
                    code: record.jurisdiction.clone(),
                }
            })?;
            groups.entry(jurisdiction).or_default().push(TaxBracket::new(
                record.min_income,
                record.max_income,
                record.rate,
            ));
        }

        Ok(groups)
    }

    /// Applies the overrides to `registry`, validating every replaced
    /// schedule.
    pub fn apply(
        registry: JurisdictionRegistry,
        records: &[BracketRecord],
    ) -> Result<JurisdictionRegistry, BracketLoaderError> {
        let mut registry = registry;
        for (jurisdiction, brackets) in Self::group(records)? {
            debug!(%jurisdiction, brackets = brackets.len(), "applying bracket override");
            registry = registry.with_brackets(jurisdiction, brackets)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "jurisdiction,min_income,max_income,rate";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    // ===== parse tests =====

    #[test]
    fn test_parse_single_bracket() {
        let csv = csv(&["USA,0,11000,10"]);

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                jurisdiction: "USA".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(11000)),
                rate: dec!(10),
            }]
        );
    }

    #[test]
    fn test_parse_unbounded_max_income() {
        let csv = csv(&["UK,125140,,45"]);

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].rate, dec!(45));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = csv(&[" SG , 0 , 20000 , 0 "]);

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].jurisdiction, "SG");
        assert_eq!(records[0].max_income, Some(dec!(20000)));
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "jurisdiction,min_income\nUSA,0";

        let err = BracketLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let BracketLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_bad_decimal() {
        let csv = csv(&["USA,abc,11000,10"]);

        let err = BracketLoader::parse(csv.as_bytes()).expect_err("Should fail for bad decimal");

        assert!(matches!(err, BracketLoaderError::CsvParse(_)));
    }

    // ===== group tests =====

    #[test]
    fn test_group_by_jurisdiction_keeps_file_order() {
        let csv = csv(&["USA,0,10000,10", "SG,0,,5", "USA,10000,,20"]);
        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        let groups = BracketLoader::group(&records).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[&Jurisdiction::UnitedStates],
            vec![
                TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(10)),
                TaxBracket::new(dec!(10000), None, dec!(20)),
            ]
        );
    }

    #[test]
    fn test_group_unknown_jurisdiction_reports_row() {
        let csv = csv(&["USA,0,,10", "XX,0,,10"]);
        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketLoader::group(&records).unwrap_err();

        let BracketLoaderError::UnknownJurisdiction { row, code } = err else {
            panic!("Expected UnknownJurisdiction, got: {:?}", err);
        };
        assert_eq!(row, 2);
        assert_eq!(code, "XX");
    }

    // ===== apply tests =====

    #[test]
    fn test_apply_replaces_schedule() {
        let csv = csv(&["USA,0,50000,10", "USA,50000,,30"]);
        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        let registry = BracketLoader::apply(JurisdictionRegistry::builtin().unwrap(), &records).unwrap();

        let usa = registry.get(Jurisdiction::UnitedStates).unwrap();
        assert_eq!(usa.brackets.len(), 2);
        assert_eq!(usa.top_marginal_rate(), dec!(30));
        assert_eq!(registry.get(Jurisdiction::UnitedKingdom).unwrap().brackets.len(), 4);
    }

    #[test]
    fn test_apply_rejects_gap() {
        let csv = csv(&["USA,0,50000,10", "USA,60000,,30"]);
        let records = BracketLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketLoader::apply(JurisdictionRegistry::builtin().unwrap(), &records).unwrap_err();

        assert!(matches!(
            err,
            BracketLoaderError::Registry(TaxEngineError::MalformedBracketTable { .. })
        ));
    }
}
