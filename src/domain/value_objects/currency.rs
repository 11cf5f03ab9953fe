//! # Currency
//!
//! The closed set of display currencies.
//!
//! Exactly three currencies are supported: the US dollar, the Angolan
//! kwanza and the euro. Each carries a fixed symbol, a human-readable name,
//! a locale tag controlling separators, and the number of fraction digits
//! shown when rendering.
//!
//! # Examples
//!
//! ```
//! use tour_catalog::domain::value_objects::currency::{Currency, SymbolPosition};
//!
//! let kz: Currency = "AOA".parse().unwrap();
//! assert_eq!(kz, Currency::Kz);
//! assert_eq!(kz.symbol(), "Kz");
//! assert_eq!(kz.fraction_digits(), 0);
//! assert_eq!(Currency::Usd.symbol_position(), SymbolPosition::Prefix);
//! ```

use crate::domain::value_objects::enums::ParseEnumError;
use num_format::Locale;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a currency symbol is placed relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1 234,50 €`
    Suffix,
}

/// Supported display currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Currency {
    /// US dollar, the default reference currency.
    #[default]
    Usd = 0,
    /// Angolan kwanza (ISO 4217 `AOA`).
    Kz = 1,
    /// Euro.
    Eur = 2,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Kz, Self::Eur];

    /// Returns the platform code (`USD`, `KZ`, `EUR`).
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Kz => "KZ",
            Self::Eur => "EUR",
        }
    }

    /// Returns the ISO 4217 code.
    #[inline]
    #[must_use]
    pub const fn iso_code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Kz => "AOA",
            Self::Eur => "EUR",
        }
    }

    /// Returns the display symbol.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Kz => "Kz",
            Self::Eur => "€",
        }
    }

    /// Returns the human-readable name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Kz => "Angolan Kwanza",
            Self::Eur => "Euro",
        }
    }

    /// Returns the BCP 47 locale tag used to render amounts.
    #[inline]
    #[must_use]
    pub const fn locale_tag(self) -> &'static str {
        match self {
            Self::Usd => "en-US",
            Self::Kz => "pt-AO",
            Self::Eur => "pt-PT",
        }
    }

    /// Returns the number-formatting locale for [`Self::locale_tag`].
    #[inline]
    #[must_use]
    pub const fn number_locale(self) -> Locale {
        match self {
            Self::Usd => Locale::en,
            Self::Kz => Locale::pt_AO,
            Self::Eur => Locale::pt_PT,
        }
    }

    /// Returns where the symbol is placed in the locale.
    #[inline]
    #[must_use]
    pub const fn symbol_position(self) -> SymbolPosition {
        match self {
            Self::Usd => SymbolPosition::Prefix,
            Self::Kz | Self::Eur => SymbolPosition::Suffix,
        }
    }

    /// Returns the number of fraction digits shown. Kwanza amounts show no cents.
    #[inline]
    #[must_use]
    pub const fn fraction_digits(self) -> u32 {
        match self {
            Self::Kz => 0,
            Self::Usd | Self::Eur => 2,
        }
    }

    /// Returns how many digits the leading group needs before grouping
    /// separators are used. Portuguese locales leave four-digit amounts
    /// ungrouped.
    #[inline]
    #[must_use]
    pub const fn min_grouping_digits(self) -> u32 {
        match self {
            Self::Usd => 1,
            Self::Kz | Self::Eur => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "KZ" | "AOA" => Ok(Self::Kz),
            "EUR" => Ok(Self::Eur),
            _ => Err(ParseEnumError::InvalidValue("Currency", s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_and_iso_codes() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("KZ".parse::<Currency>().unwrap(), Currency::Kz);
        assert_eq!("AOA".parse::<Currency>().unwrap(), Currency::Kz);
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = "GBP".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "invalid Currency value: 'GBP'");
    }

    #[test]
    fn kwanza_has_no_cents() {
        assert_eq!(Currency::Kz.fraction_digits(), 0);
        assert_eq!(Currency::Usd.fraction_digits(), 2);
        assert_eq!(Currency::Eur.fraction_digits(), 2);
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Currency::Usd.locale_tag(), "en-US");
        assert_eq!(Currency::Kz.locale_tag(), "pt-AO");
        assert_eq!(Currency::Eur.locale_tag(), "pt-PT");
    }

    #[test]
    fn serde_uses_platform_code() {
        let json = serde_json::to_string(&Currency::Kz).unwrap();
        assert_eq!(json, "\"KZ\"");
        let back: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(back, Currency::Eur);
    }
}
