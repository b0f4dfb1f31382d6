//! Currency-code resolution, mass units, and precious-metal purity tables.
//!
//! Everything in this module is a pure, infallible normalization step: the
//! calculators lean on these helpers so that by the time a value reaches the
//! price feed it carries a recognized currency code, a mass in grams, and a
//! purity-discounted weight.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

use crate::pricing::Metal;

/// Grams per troy ounce. Shared by mass normalization and per-gram pricing
/// so the two paths can never disagree.
pub const OUNCE_TO_GRAM: Decimal = dec!(31.1034768);

/// Currency and commodity codes the engine accepts on line items: ISO 4217
/// plus the metal spot, LBMA fixing, and Indian local-market codes quoted by
/// the upstream price feed. Treated as an opaque allow-list.
static KNOWN_CURRENCIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "XAG", "XAG-BID", "XAG-ASK", "XAU", "XAU-BID", "XAU-ASK", "XPD", "XPD-BID", "XPD-ASK",
        "XPT", "XPT-BID", "XPT-ASK", "XRH", "LBMA-XAG", "LBMA-XAU-AM", "LBMA-XAU-PM",
        "LBMA-XPD-AM", "LBMA-XPD-PM", "LBMA-XPT-AM", "LBMA-XPT-PM", "ALU", "XCO", "XCU", "XGA",
        "XIN", "IRON", "XPB", "XLI", "XMO", "NI", "XND", "XSN", "XTE", "XU", "ZNC", "XAU-AHME",
        "XAU-BANG", "XAU-BHOP", "XAU-CHAN", "XAU-CHEN", "XAU-COIM", "XAU-DEHR", "XAU-FARI",
        "XAU-GURG", "XAU-GUWA", "XAU-HYDE", "XAU-INDO", "XAU-JAIP", "XAU-KANP", "XAU-KOCH",
        "XAU-KOLH", "XAU-KOLK", "XAU-LUCK", "XAU-LUDH", "XAU-MADU", "XAU-MALA", "XAU-MANG",
        "XAU-MEER", "XAU-MUMB", "XAU-MYSO", "XAU-NAGP", "XAU-NOID", "XAU-PATN", "XAU-POND",
        "XAU-PUNE", "XAU-RAIP", "XAU-SALE", "XAU-VIJA", "XAU-VISA", "XAG-AHME", "XAG-BANG",
        "XAG-CHAN", "XAG-CHEN", "XAG-COIM", "XAG-HYDE", "XAG-JAIP", "XAG-KOLK", "XAG-LUCK",
        "XAG-MADU", "XAG-MANG", "XAG-MUMB", "XAG-MYSO", "XAG-NAGP", "XAG-PATN", "XAG-PUNE",
        "XAG-SALE", "XAG-VIJA", "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AZN",
        "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BIH", "BND", "BOB", "BRL", "BSD", "BTC",
        "BTN", "BYN", "BZD", "CAD", "CDF", "CHF", "CLF", "CLP", "CNY", "COP", "CRC", "CVE",
        "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "ETH", "EUR", "FJD", "FKP",
        "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG",
        "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS",
        "KHR", "KMF", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD",
        "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRO", "MUR", "MVR", "MWK", "MXN",
        "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PHP",
        "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SCR", "SDG", "SEK",
        "SGD", "SHP", "SLL", "SOS", "SRD", "STN", "SVC", "SZL", "THB", "TJS", "TMT", "TND",
        "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU", "UZS", "VES", "VND",
        "VUV", "WST", "XAF", "XCD", "XOF", "XPF", "XRP", "YER", "ZAR", "ZMK", "ZMW",
    ]
    .into_iter()
    .collect()
});

/// Returns `code` when it belongs to the known-currency set, otherwise
/// `fallback`.
///
/// This is the engine's leniency policy for malformed line items: an
/// unrecognized code never fails the item, it just prices it in the
/// request's base currency.
pub fn resolve_currency_code<'a>(code: &'a str, fallback: &'a str) -> &'a str {
    if KNOWN_CURRENCIES.contains(code) {
        code
    } else {
        tracing::debug!(code, fallback, "unknown currency code, using fallback");
        fallback
    }
}

pub fn is_known_currency(code: &str) -> bool {
    KNOWN_CURRENCIES.contains(code)
}

/// Mass unit of a precious-metal line item.
///
/// Deserialization is permissive: anything that is not `kg` or `oz` is read
/// as grams, matching the engine's favor-availability posture toward
/// malformed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "oz")]
    TroyOunces,
}

impl MassUnit {
    pub fn from_code(code: &str) -> Self {
        match code {
            "kg" => MassUnit::Kilograms,
            "oz" => MassUnit::TroyOunces,
            _ => MassUnit::Grams,
        }
    }

    /// Converts `value` expressed in this unit to grams.
    pub fn to_grams(self, value: Decimal) -> Decimal {
        match self {
            MassUnit::Grams => value,
            MassUnit::Kilograms => value * dec!(1000),
            MassUnit::TroyOunces => value * OUNCE_TO_GRAM,
        }
    }
}

impl<'de> Deserialize<'de> for MassUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(MassUnit::from_code(&code))
    }
}

/// Qarat purity codes for gold, mapped to the fraction of pure metal in the
/// alloy. The keys are the hallmark spellings accepted on the wire.
static GOLD_PURITY: Lazy<HashMap<&'static str, Decimal>> = Lazy::new(|| {
    HashMap::from([
        ("375/9K", dec!(0.35)),
        ("500/12K", dec!(0.464)),
        ("583/585/14K", dec!(0.56)),
        ("750/18K", dec!(0.72)),
        ("850/21K", dec!(0.8)),
        ("900/916/22K", dec!(0.864)),
        ("958", dec!(0.91)),
        ("999/24K", dec!(1.0)),
    ])
});

static SILVER_PURITY: Lazy<HashMap<&'static str, Decimal>> = Lazy::new(|| {
    HashMap::from([
        ("600", dec!(0.3)),
        ("750", dec!(0.5)),
        ("800", dec!(0.66)),
        ("875/884", dec!(0.84)),
        ("900/925", dec!(0.9)),
        ("999", dec!(1.0)),
    ])
});

/// Purity multiplier in (0, 1] for a qarat code. Unknown codes are valued
/// at full purity.
pub fn purity_multiplier(metal: Metal, qarat: &str) -> Decimal {
    let table = match metal {
        Metal::Gold => &*GOLD_PURITY,
        Metal::Silver => &*SILVER_PURITY,
    };
    table.get(qarat).copied().unwrap_or(Decimal::ONE)
}
