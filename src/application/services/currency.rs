//! # Currency Conversion
//!
//! Exchange-rate table, conversion and locale-aware price rendering.
//!
//! Rates are static per process. The table is built once from the two
//! dollar legs (`USD -> KZ`, `USD -> EUR`); reciprocal and cross rates are
//! precomputed at build time, so a conversion is a single lookup and one
//! multiplication. Converting a currency into itself returns the amount
//! untouched.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::application::services::currency::CurrencyConverter;
//! use tour_catalog::domain::value_objects::Currency;
//! use rust_decimal::Decimal;
//!
//! let converter = CurrencyConverter::default();
//! let kz = converter
//!     .convert(Decimal::new(100, 0), Currency::Usd, Currency::Kz)
//!     .unwrap();
//! assert_eq!(kz, Decimal::new(88_000, 0));
//! assert_eq!(converter.format(Decimal::new(123_450, 2), Currency::Usd).unwrap(), "$1,234.50");
//! ```

use crate::domain::entities::listing::Pricing;
use crate::domain::value_objects::{Currency, PriceUnit, SymbolPosition};
use num_format::ToFormattedString;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Default rate: kwanzas per US dollar.
pub const DEFAULT_USD_TO_KZ: Decimal = Decimal::from_parts(880, 0, 0, false, 0);

/// Default rate: euros per US dollar.
pub const DEFAULT_USD_TO_EUR: Decimal = Decimal::from_parts(93, 0, 0, false, 2);

/// Currency conversion or formatting failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// A rate was zero or negative.
    #[error("invalid exchange rate {from} -> {to}: {rate}")]
    InvalidRate {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
        /// Offending rate.
        rate: Decimal,
    },

    /// The table has no dollar leg for a currency.
    #[error("missing USD exchange rate for {0}")]
    MissingUsdLeg(Currency),

    /// No direct rate and no route through the dollar.
    #[error("no exchange rate from {from} to {to}")]
    UnsupportedPair {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },

    /// The converted amount does not fit the decimal range.
    #[error("amount overflow converting {from} to {to}")]
    Overflow {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },
}

/// Result type for currency operations.
pub type CurrencyResult<T> = Result<T, CurrencyError>;

/// Rates keyed by ordered currency pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<(Currency, Currency), Decimal>,
}

impl ExchangeRateTable {
    /// Builds a complete table from the two dollar legs.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] if a rate is not positive.
    pub fn from_usd_rates(usd_to_kz: Decimal, usd_to_eur: Decimal) -> CurrencyResult<Self> {
        Self::builder()
            .rate(Currency::Usd, Currency::Kz, usd_to_kz)
            .rate(Currency::Usd, Currency::Eur, usd_to_eur)
            .build()
    }

    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> ExchangeRateTableBuilder {
        ExchangeRateTableBuilder::default()
    }

    /// Returns the direct rate for an ordered pair.
    ///
    /// The identity pair always has rate 1.
    #[must_use]
    pub fn rate(&self, from: Currency, to: Currency) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }
        self.rates.get(&(from, to)).copied()
    }

    /// Returns the number of stored ordered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no rate is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        let mut rates = HashMap::new();
        insert_leg(&mut rates, Currency::Kz, DEFAULT_USD_TO_KZ);
        insert_leg(&mut rates, Currency::Eur, DEFAULT_USD_TO_EUR);
        insert_crosses(&mut rates);
        Self { rates }
    }
}

/// Builder for [`ExchangeRateTable`].
#[derive(Debug, Clone)]
pub struct ExchangeRateTableBuilder {
    rates: Vec<(Currency, Currency, Decimal)>,
    cross_rates: bool,
}

impl Default for ExchangeRateTableBuilder {
    fn default() -> Self {
        Self {
            rates: Vec::new(),
            cross_rates: true,
        }
    }
}

impl ExchangeRateTableBuilder {
    /// Adds a rate: one unit of `from` buys `rate` units of `to`.
    #[must_use]
    pub fn rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.rates.push((from, to, rate));
        self
    }

    /// Skips precomputing rates between two non-dollar currencies.
    ///
    /// Those pairs are then converted through the dollar at call time.
    #[must_use]
    pub fn without_cross_rates(mut self) -> Self {
        self.cross_rates = false;
        self
    }

    /// Validates the rates and precomputes reciprocals.
    ///
    /// # Errors
    ///
    /// - [`CurrencyError::InvalidRate`] if a rate is not positive
    /// - [`CurrencyError::MissingUsdLeg`] if a currency has no dollar rate
    ///   in either direction
    pub fn build(self) -> CurrencyResult<ExchangeRateTable> {
        let mut rates = HashMap::new();
        for (from, to, rate) in self.rates {
            if from == to {
                continue;
            }
            if rate <= Decimal::ZERO {
                return Err(CurrencyError::InvalidRate { from, to, rate });
            }
            rates.insert((from, to), rate);
            if let Some(inverse) = Decimal::ONE.checked_div(rate) {
                rates.entry((to, from)).or_insert(inverse);
            }
        }

        for currency in Currency::ALL {
            if currency != Currency::Usd && !rates.contains_key(&(Currency::Usd, currency)) {
                return Err(CurrencyError::MissingUsdLeg(currency));
            }
        }

        if self.cross_rates {
            insert_crosses(&mut rates);
        }
        Ok(ExchangeRateTable { rates })
    }
}

fn insert_leg(rates: &mut HashMap<(Currency, Currency), Decimal>, to: Currency, rate: Decimal) {
    rates.insert((Currency::Usd, to), rate);
    if let Some(inverse) = Decimal::ONE.checked_div(rate) {
        rates.insert((to, Currency::Usd), inverse);
    }
}

fn insert_crosses(rates: &mut HashMap<(Currency, Currency), Decimal>) {
    for from in Currency::ALL {
        for to in Currency::ALL {
            if from == to || from == Currency::Usd || to == Currency::Usd {
                continue;
            }
            if rates.contains_key(&(from, to)) {
                continue;
            }
            let via_usd = rates
                .get(&(from, Currency::Usd))
                .zip(rates.get(&(Currency::Usd, to)))
                .and_then(|(to_usd, from_usd)| to_usd.checked_mul(*from_usd));
            if let Some(rate) = via_usd {
                rates.insert((from, to), rate);
            }
        }
    }
}

/// Converts and renders amounts between the supported currencies.
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    table: ExchangeRateTable,
}

impl CurrencyConverter {
    /// Creates a converter over a rate table.
    #[must_use]
    pub fn new(table: ExchangeRateTable) -> Self {
        Self { table }
    }

    /// Returns the rate table.
    #[must_use]
    pub fn table(&self) -> &ExchangeRateTable {
        &self.table
    }

    /// Converts an amount.
    ///
    /// Same-currency conversion returns `amount` unchanged. Pairs without a
    /// direct rate go through the dollar.
    ///
    /// # Errors
    ///
    /// - [`CurrencyError::UnsupportedPair`] if no route exists
    /// - [`CurrencyError::Overflow`] if the result does not fit a decimal
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> CurrencyResult<Decimal> {
        if from == to {
            return Ok(amount);
        }
        if let Some(rate) = self.table.rate(from, to) {
            return amount
                .checked_mul(rate)
                .ok_or(CurrencyError::Overflow { from, to });
        }

        let (Some(to_usd), Some(from_usd)) = (
            self.table.rate(from, Currency::Usd),
            self.table.rate(Currency::Usd, to),
        ) else {
            return Err(CurrencyError::UnsupportedPair { from, to });
        };
        tracing::warn!(%from, %to, "no direct exchange rate, converting via USD");
        amount
            .checked_mul(to_usd)
            .and_then(|usd| usd.checked_mul(from_usd))
            .ok_or(CurrencyError::Overflow { from, to })
    }

    /// Converts an amount and returns it as `f64` for scoring.
    ///
    /// # Errors
    ///
    /// Same as [`convert`](Self::convert).
    pub fn comparable_amount(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> CurrencyResult<f64> {
        let converted = self.convert(amount, from, to)?;
        converted
            .to_f64()
            .ok_or(CurrencyError::Overflow { from, to })
    }

    /// Renders an amount in the currency's locale.
    ///
    /// The kwanza is shown without decimals, the other currencies with two.
    /// Grouping and decimal separators come from the currency's locale, and
    /// kwanza and euro amounts below 10 000 are not grouped. The dollar sign
    /// is a prefix, the other symbols a suffix.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::Overflow`] if the integer part does not fit
    /// a `u128`.
    pub fn format(&self, amount: Decimal, currency: Currency) -> CurrencyResult<String> {
        format_amount(amount, currency)
    }

    /// Builds the display price of a listing in `display` currency.
    ///
    /// # Errors
    ///
    /// Propagates conversion and formatting failures.
    pub fn price_display(&self, pricing: &Pricing, display: Currency) -> CurrencyResult<PriceDisplay> {
        let amount = self.convert(pricing.amount(), pricing.currency(), display)?;
        let original_formatted = pricing
            .original_amount()
            .map(|original| {
                self.convert(original, pricing.currency(), display)
                    .and_then(|converted| format_amount(converted, display))
            })
            .transpose()?;

        Ok(PriceDisplay {
            currency: display,
            amount,
            formatted: format_amount(amount, display)?,
            original_formatted,
            discount_percent: pricing.discount_percent(),
            unit: pricing.unit(),
        })
    }
}

fn format_amount(amount: Decimal, currency: Currency) -> CurrencyResult<String> {
    let digits = currency.fraction_digits();
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let magnitude = rounded.abs();
    let overflow = CurrencyError::Overflow {
        from: currency,
        to: currency,
    };

    let locale = currency.number_locale();
    let integer = magnitude.trunc();
    let whole = integer.to_u128().ok_or_else(|| overflow.clone())?;
    let mut number = if whole < 10_u128.pow(2 + currency.min_grouping_digits()) {
        whole.to_string()
    } else {
        whole.to_formatted_string(&locale)
    };

    if digits > 0 {
        let scale = Decimal::from(10_u64.pow(digits));
        let fraction = (magnitude - integer)
            .checked_mul(scale)
            .and_then(|scaled| scaled.trunc().to_u64())
            .ok_or(overflow)?;
        number.push_str(locale.decimal());
        number.push_str(&format!("{fraction:0width$}", width = digits as usize));
    }

    let sign = if negative { "-" } else { "" };
    Ok(match currency.symbol_position() {
        SymbolPosition::Prefix => format!("{sign}{}{number}", currency.symbol()),
        SymbolPosition::Suffix => format!("{sign}{number} {}", currency.symbol()),
    })
}

/// Price of a listing as shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceDisplay {
    /// Currency the price is shown in.
    pub currency: Currency,
    /// Converted amount.
    #[schemars(with = "String")]
    pub amount: Decimal,
    /// Locale-formatted amount.
    pub formatted: String,
    /// Locale-formatted pre-discount amount, shown struck through.
    pub original_formatted: Option<String>,
    /// Advertised discount.
    pub discount_percent: Option<f64>,
    /// Unit the price is charged per.
    pub unit: PriceUnit,
}

impl PriceDisplay {
    /// Returns the unit suffix, empty for fixed prices.
    #[must_use]
    pub fn unit_suffix(&self) -> &'static str {
        self.unit.suffix()
    }

    /// Returns the formatted amount followed by the unit suffix.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.formatted, self.unit_suffix())
    }

    /// Returns true if a discount badge should be shown.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percent.is_some_and(|discount| discount > 0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use num_format::Locale;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    mod table {
        use super::*;

        #[test]
        fn default_table_is_complete() {
            let table = ExchangeRateTable::default();
            assert_eq!(table.len(), 6);
            assert_eq!(table.rate(Currency::Usd, Currency::Kz), Some(dec("880")));
            assert_eq!(table.rate(Currency::Usd, Currency::Eur), Some(dec("0.93")));
            assert_eq!(table.rate(Currency::Eur, Currency::Eur), Some(Decimal::ONE));
            for from in Currency::ALL {
                for to in Currency::ALL {
                    assert!(table.rate(from, to).is_some(), "{from} -> {to}");
                }
            }
        }

        #[test]
        fn reciprocals_multiply_to_one() {
            let table = ExchangeRateTable::default();
            for from in Currency::ALL {
                for to in Currency::ALL {
                    let there = table.rate(from, to).unwrap().to_f64().unwrap();
                    let back = table.rate(to, from).unwrap().to_f64().unwrap();
                    assert!((there * back - 1.0).abs() < 1e-9, "{from} <-> {to}");
                }
            }
        }

        #[test]
        fn builder_matches_default() {
            let built = ExchangeRateTable::from_usd_rates(DEFAULT_USD_TO_KZ, DEFAULT_USD_TO_EUR)
                .unwrap();
            assert_eq!(built, ExchangeRateTable::default());
        }

        #[test]
        fn builder_rejects_non_positive_rate() {
            let err = ExchangeRateTable::from_usd_rates(Decimal::ZERO, dec("0.93")).unwrap_err();
            assert!(matches!(err, CurrencyError::InvalidRate { .. }));
        }

        #[test]
        fn builder_requires_usd_legs() {
            let err = ExchangeRateTable::builder()
                .rate(Currency::Usd, Currency::Kz, dec("880"))
                .build()
                .unwrap_err();
            assert_eq!(err, CurrencyError::MissingUsdLeg(Currency::Eur));
        }

        #[test]
        fn builder_accepts_inverse_leg() {
            let table = ExchangeRateTable::builder()
                .rate(Currency::Kz, Currency::Usd, dec("0.001"))
                .rate(Currency::Usd, Currency::Eur, dec("0.9"))
                .build()
                .unwrap();
            assert_eq!(table.rate(Currency::Usd, Currency::Kz), Some(dec("1000")));
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn identity_is_exact() {
            let converter = CurrencyConverter::default();
            let amount = dec("1234.5678");
            for currency in Currency::ALL {
                assert_eq!(converter.convert(amount, currency, currency).unwrap(), amount);
            }
        }

        #[test]
        fn direct_rates() {
            let converter = CurrencyConverter::default();
            assert_eq!(
                converter.convert(dec("100"), Currency::Usd, Currency::Eur).unwrap(),
                dec("93")
            );
            assert_eq!(
                converter.convert(dec("88000"), Currency::Kz, Currency::Usd).unwrap().round_dp(6),
                dec("100")
            );
        }

        #[test]
        fn falls_back_through_usd() {
            let table = ExchangeRateTable::builder()
                .rate(Currency::Usd, Currency::Kz, dec("880"))
                .rate(Currency::Usd, Currency::Eur, dec("0.93"))
                .without_cross_rates()
                .build()
                .unwrap();
            assert!(table.rate(Currency::Kz, Currency::Eur).is_none());

            let converter = CurrencyConverter::new(table);
            let eur = converter.convert(dec("880"), Currency::Kz, Currency::Eur).unwrap();
            assert_eq!(eur.round_dp(6), dec("0.93"));
        }

        #[test]
        fn comparable_amount_is_f64() {
            let converter = CurrencyConverter::default();
            let usd = converter
                .comparable_amount(dec("44000"), Currency::Kz, Currency::Usd)
                .unwrap();
            assert!((usd - 50.0).abs() < 1e-9);
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn usd_uses_prefix_and_two_decimals() {
            let converter = CurrencyConverter::default();
            assert_eq!(converter.format(dec("1234.5"), Currency::Usd).unwrap(), "$1,234.50");
            assert_eq!(converter.format(dec("0.005"), Currency::Usd).unwrap(), "$0.01");
            assert_eq!(converter.format(dec("999"), Currency::Usd).unwrap(), "$999.00");
        }

        #[test]
        fn kwanza_has_no_decimals() {
            let converter = CurrencyConverter::default();
            let separator = Locale::pt_AO.separator();
            assert_eq!(
                converter.format(dec("88000.4"), Currency::Kz).unwrap(),
                format!("88{separator}000 Kz")
            );
            assert_eq!(
                converter.format(dec("1234567.5"), Currency::Kz).unwrap(),
                format!("1{separator}234{separator}568 Kz")
            );
        }

        #[test]
        fn euro_uses_portuguese_separators() {
            let converter = CurrencyConverter::default();
            let locale = Locale::pt_PT;
            assert_eq!(
                converter.format(dec("12345.5"), Currency::Eur).unwrap(),
                format!("12{}345{}50 €", locale.separator(), locale.decimal())
            );
        }

        #[test]
        fn portuguese_four_digit_amounts_are_not_grouped() {
            let converter = CurrencyConverter::default();
            let decimal = Locale::pt_PT.decimal();
            assert_eq!(
                converter.format(dec("1234.5"), Currency::Eur).unwrap(),
                format!("1234{decimal}50 €")
            );
            assert_eq!(
                converter.format(dec("4400"), Currency::Kz).unwrap(),
                "4400 Kz"
            );
            assert_eq!(
                converter.format(dec("9999.4"), Currency::Kz).unwrap(),
                "9999 Kz"
            );
            assert_eq!(converter.format(dec("1000"), Currency::Usd).unwrap(), "$1,000.00");
        }

        #[test]
        fn negative_amounts_keep_sign() {
            let converter = CurrencyConverter::default();
            assert_eq!(converter.format(dec("-5"), Currency::Usd).unwrap(), "-$5.00");
        }
    }

    mod display {
        use super::*;

        #[test]
        fn price_display_converts_amount_and_original() {
            let converter = CurrencyConverter::default();
            let pricing = Pricing::new(Currency::Usd, dec("80"), PriceUnit::PerNight)
                .with_original(dec("100"))
                .with_discount(20.0);
            let display = converter.price_display(&pricing, Currency::Eur).unwrap();

            assert_eq!(display.amount, dec("74.40"));
            assert_eq!(display.currency, Currency::Eur);
            assert!(display.original_formatted.as_ref().unwrap().starts_with("93"));
            assert!(display.has_discount());
            assert_eq!(display.unit_suffix(), "/night");
            assert!(display.label().ends_with("€/night"));
        }

        #[test]
        fn fixed_price_has_no_suffix() {
            let converter = CurrencyConverter::default();
            let pricing = Pricing::new(Currency::Usd, dec("15"), PriceUnit::Fixed);
            let display = converter.price_display(&pricing, Currency::Usd).unwrap();
            assert_eq!(display.label(), "$15.00");
            assert!(display.original_formatted.is_none());
            assert!(!display.has_discount());
        }
    }
}
