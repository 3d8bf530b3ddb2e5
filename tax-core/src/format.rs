//! Currency formatting for display. Not used by the tax math.

use rust_decimal::Decimal;
use rusty_money::{FormattableCurrency, Formatter, Money, Params, Position, define_currency_set};

use crate::calculations::common::round_half_up_dp;
use crate::error::TaxEngineError;
use crate::models::Currency;

define_currency_set!(
    currencies {
        AED: {
            code: "AED",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "United Arab Emirates Dirham",
            symbol: "AED ",
            symbol_first: true,
        },
        AUD: {
            code: "AUD",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "Australian Dollar",
            symbol: "A$",
            symbol_first: true,
        },
        CAD: {
            code: "CAD",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "Canadian Dollar",
            symbol: "C$",
            symbol_first: true,
        },
        CHF: {
            code: "CHF",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "Swiss Franc",
            symbol: "CHF ",
            symbol_first: true,
        },
        EUR: {
            code: "EUR",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "Euro",
            symbol: "€",
            symbol_first: true,
        },
        GBP: {
            code: "GBP",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "British Pound",
            symbol: "£",
            symbol_first: true,
        },
        HKD: {
            code: "HKD",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "Hong Kong Dollar",
            symbol: "HK$",
            symbol_first: true,
        },
        INR: {
            code: "INR",
            exponent: 2,
            locale: EnIn,
            minor_units: 100,
            name: "Indian Rupee",
            symbol: "₹",
            symbol_first: true,
        },
        JPY: {
            code: "JPY",
            exponent: 0,
            locale: EnUs,
            minor_units: 1,
            name: "Japanese Yen",
            symbol: "¥",
            symbol_first: true,
        },
        SGD: {
            code: "SGD",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "Singapore Dollar",
            symbol: "S$",
            symbol_first: true,
        },
        USD: {
            code: "USD",
            exponent: 2,
            locale: EnUs,
            minor_units: 100,
            name: "United States Dollar",
            symbol: "$",
            symbol_first: true,
        }
    }
);

/// Looks up a supported currency by ISO code.
pub fn find_currency(code: &str) -> Result<&'static currencies::Currency, TaxEngineError> {
    currencies::find(code).ok_or_else(|| TaxEngineError::UnknownCurrency(code.to_string()))
}

impl From<&currencies::Currency> for Currency {
    fn from(currency: &currencies::Currency) -> Self {
        Self {
            code: currency.code().to_string(),
            symbol: currency.symbol().to_string(),
            decimals: currency.exponent(),
        }
    }
}

/// Formats `amount` with the currency symbol and `,` thousands separators.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{Currency, format::format_money};
///
/// let usd = Currency { code: "USD".into(), symbol: "$".into(), decimals: 2 };
/// assert_eq!(format_money(dec!(1234567.891), &usd).unwrap(), "$1,234,567.89");
/// assert_eq!(format_money(dec!(-1234.5), &usd).unwrap(), "-$1,234.50");
/// ```
///
/// # Errors
///
/// [`TaxEngineError::UnknownCurrency`] when `currency.code` is not supported.
pub fn format_money(
    amount: Decimal,
    currency: &Currency,
) -> Result<String, TaxEngineError> {
    Ok(format_in(amount, find_currency(&currency.code)?))
}

/// Rounds half away from zero to the currency's exponent, then formats.
pub fn format_in(
    amount: Decimal,
    currency: &currencies::Currency,
) -> String {
    let exponent = currency.exponent();
    let mut rounded = round_half_up_dp(amount, exponent);
    // -0.00 would otherwise print a sign.
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(exponent);

    let money = Money::from_decimal(rounded, currency);
    Formatter::money(
        &money,
        Params {
            digit_separator: ',',
            exponent_separator: '.',
            separator_pattern: vec![3; 6],
            positions: vec![Position::Sign, Position::Symbol, Position::Amount],
            symbol: Some(currency.symbol()),
            ..Default::default()
        },
    )
}
