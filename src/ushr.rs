//! Ushr: Zakat on agricultural produce.
//!
//! One land-level rate applies to every crop in the request. Land that is
//! not ushr land owes nothing; artificially irrigated land is taxed at
//! half the rain-fed rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const IRRIGATED_RATE: Decimal = dec!(0.05);
const RAIN_FED_RATE: Decimal = dec!(0.10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UshrRequest {
    #[serde(default)]
    pub crops: Vec<Crop>,
    #[serde(default)]
    pub is_ushr_land: bool,
    #[serde(default)]
    pub is_irrigated: bool,
}

/// Taxed amount for one crop, not a restatement of its input quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UshrItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UshrZakat {
    pub zakat_ushr_value: Vec<UshrItem>,
}

/// Applies the land rate to every crop. The output is 1:1 with the input
/// in length and order; zero-rate land yields a zero row per crop rather
/// than dropping them.
pub fn calculate(request: &UshrRequest) -> UshrZakat {
    let rate = if !request.is_ushr_land {
        Decimal::ZERO
    } else if request.is_irrigated {
        IRRIGATED_RATE
    } else {
        RAIN_FED_RATE
    };

    let zakat_ushr_value = request
        .crops
        .iter()
        .map(|crop| UshrItem {
            kind: crop.kind.clone(),
            quantity: Decimal::from(crop.quantity) * rate,
        })
        .collect();

    UshrZakat { zakat_ushr_value }
}
