use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{CustomIncomeSource, IncomeType, TaxEngineError, TaxTreatment};
use thiserror::Error;

/// Errors that can occur when loading custom income sources.
#[derive(Debug, Error)]
pub enum IncomeLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: unknown income type '{value}'")]
    UnknownIncomeType { row: usize, value: String },

    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: TaxEngineError,
    },
}

impl From<csv::Error> for IncomeLoaderError {
    fn from(err: csv::Error) -> Self {
        IncomeLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a custom income CSV file.
///
/// `tax_treatment` may be left empty to use the income type's default.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IncomeRecord {
    pub id: String,
    pub label: String,
    pub amount: Decimal,
    pub income_type: String,
    #[serde(default)]
    pub tax_treatment: Option<String>,
}

impl IncomeRecord {
    /// Resolves the codes; `row` is only used for error reporting.
    pub fn into_source(
        self,
        row: usize,
    ) -> Result<CustomIncomeSource, IncomeLoaderError> {
        let income_type = IncomeType::parse(&self.income_type).ok_or_else(|| {
            IncomeLoaderError::UnknownIncomeType {
                row,
                value: self.income_type.clone(),
            }
        })?;

        let tax_treatment = match self.tax_treatment.as_deref().map(str::trim) {
            None | Some("") => income_type.default_treatment(),
            Some(code) => TaxTreatment::parse(code).ok_or_else(|| IncomeLoaderError::InvalidRow {
                row,
                source: TaxEngineError::UnknownTaxTreatment(code.to_string()),
            })?,
        };

        Ok(CustomIncomeSource {
            id: self.id,
            label: self.label,
            amount: self.amount,
            income_type,
            tax_treatment,
        })
    }
}

/// Loader for custom income sources.
pub struct IncomeLoader;

impl IncomeLoader {
    /// Parse raw records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<IncomeRecord>, IncomeLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: IncomeRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and resolve every row. Row numbers in errors are 1-based and do
    /// not count the header.
    pub fn load<R: Read>(reader: R) -> Result<Vec<CustomIncomeSource>, IncomeLoaderError> {
        Self::parse(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_source(index + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "id,label,amount,income_type,tax_treatment";

    // ===== load tests =====

    #[test]
    fn test_load_explicit_treatment() {
        let csv = format!("{HEADER}\nside,Side gig,1200.50,freelance,ordinary_income");

        let sources = IncomeLoader::load(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(
            sources,
            vec![CustomIncomeSource {
                id: "side".to_string(),
                label: "Side gig".to_string(),
                amount: dec!(1200.50),
                income_type: IncomeType::Freelance,
                tax_treatment: TaxTreatment::OrdinaryIncome,
            }]
        );
    }

    #[test]
    fn test_load_empty_treatment_uses_default() {
        let csv = format!("{HEADER}\nsale,Shares,5000,stock_sale,");

        let sources = IncomeLoader::load(csv.as_bytes()).expect("Failed to load CSV");

        assert_eq!(sources[0].tax_treatment, TaxTreatment::CapitalGains);
    }

    #[test]
    fn test_load_unknown_income_type_reports_row() {
        let csv = format!("{HEADER}\na,A,1,gift,\nb,B,1,lottery,");

        let err = IncomeLoader::load(csv.as_bytes()).unwrap_err();

        let IncomeLoaderError::UnknownIncomeType { row, value } = err else {
            panic!("Expected UnknownIncomeType, got: {:?}", err);
        };
        assert_eq!(row, 2);
        assert_eq!(value, "lottery");
    }

    #[test]
    fn test_load_unknown_treatment_is_rejected() {
        let csv = format!("{HEADER}\na,A,1,gift,tax_free");

        let err = IncomeLoader::load(csv.as_bytes()).unwrap_err();

        let IncomeLoaderError::InvalidRow { row, source } = err else {
            panic!("Expected InvalidRow, got: {:?}", err);
        };
        assert_eq!(row, 1);
        assert_eq!(source, TaxEngineError::UnknownTaxTreatment("tax_free".to_string()));
    }

    #[test]
    fn test_load_bad_amount() {
        let csv = format!("{HEADER}\na,A,lots,gift,");

        let err = IncomeLoader::load(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, IncomeLoaderError::CsvParse(_)));
    }
}
