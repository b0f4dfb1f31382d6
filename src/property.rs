//! Zakat on property: cash, trade goods, stocks, rent, and precious-metal
//! jewelry, normalized into one currency and gated on the silver Nisab.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::currency::{purity_multiplier, resolve_currency_code, MassUnit};
use crate::pricing::{Metal, PriceFeed, RateSession};
use crate::types::ZakatError;

const RATE: Decimal = dec!(0.025);

/// One contribution to a property category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryItem {
    pub currency_code: String,
    pub value: Decimal,
}

impl MonetaryItem {
    pub fn new(currency_code: impl Into<String>, value: Decimal) -> Self {
        Self {
            currency_code: currency_code.into(),
            value,
        }
    }
}

fn default_qarat() -> String {
    "999".to_string()
}

/// A jewelry line item measured by mass and hallmark purity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreciousMetalItem {
    pub value: Decimal,
    #[serde(default)]
    pub measurement_unit: MassUnit,
    #[serde(default = "default_qarat")]
    pub qarat: String,
}

impl PreciousMetalItem {
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            measurement_unit: MassUnit::Grams,
            qarat: default_qarat(),
        }
    }

    pub fn with_unit(mut self, unit: MassUnit) -> Self {
        self.measurement_unit = unit;
        self
    }

    pub fn with_qarat(mut self, qarat: impl Into<String>) -> Self {
        self.qarat = qarat.into();
        self
    }
}

/// Everything a person owns that counts toward property Zakat, plus the
/// taxes owed against it. `currency` is the target currency of the result;
/// omitted it falls back to the configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRequest {
    #[serde(default)]
    pub cash: Vec<MonetaryItem>,
    #[serde(default)]
    pub cash_on_bank_cards: Vec<MonetaryItem>,
    #[serde(default)]
    pub purchased_product_for_resaling: Vec<MonetaryItem>,
    #[serde(default)]
    pub unfinished_product: Vec<MonetaryItem>,
    #[serde(default)]
    pub produced_product_for_resaling: Vec<MonetaryItem>,
    #[serde(default)]
    pub purchased_not_for_resaling: Vec<MonetaryItem>,
    #[serde(default)]
    pub used_after_nisab: Vec<MonetaryItem>,
    #[serde(default)]
    pub rent_money: Vec<MonetaryItem>,
    #[serde(default)]
    pub stocks_for_resaling: Vec<MonetaryItem>,
    #[serde(default)]
    pub income_from_stocks: Vec<MonetaryItem>,
    #[serde(default)]
    pub taxes_value: Vec<MonetaryItem>,
    #[serde(default)]
    pub silver_jewelry: Vec<PreciousMetalItem>,
    #[serde(default)]
    pub gold_jewelry: Vec<PreciousMetalItem>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl PropertyRequest {
    fn additive_categories(&self) -> [(&'static str, &[MonetaryItem]); 10] {
        [
            ("cash", &self.cash),
            ("cash_on_bank_cards", &self.cash_on_bank_cards),
            (
                "purchased_product_for_resaling",
                &self.purchased_product_for_resaling,
            ),
            ("unfinished_product", &self.unfinished_product),
            (
                "produced_product_for_resaling",
                &self.produced_product_for_resaling,
            ),
            ("purchased_not_for_resaling", &self.purchased_not_for_resaling),
            ("used_after_nisab", &self.used_after_nisab),
            ("rent_money", &self.rent_money),
            ("stocks_for_resaling", &self.stocks_for_resaling),
            ("income_from_stocks", &self.income_from_stocks),
        ]
    }

    /// Checked before any external lookup happens.
    pub fn validate(&self) -> Result<(), ZakatError> {
        for (name, items) in self.additive_categories() {
            validate_monetary(name, items)?;
        }
        validate_monetary("taxes_value", &self.taxes_value)?;

        for (name, items) in [
            ("silver_jewelry", &self.silver_jewelry),
            ("gold_jewelry", &self.gold_jewelry),
        ] {
            if items.iter().any(|item| item.value < Decimal::ZERO) {
                return Err(ZakatError::InvalidRequest(format!(
                    "{name}: value must be non-negative"
                )));
            }
        }
        Ok(())
    }
}

fn validate_monetary(name: &str, items: &[MonetaryItem]) -> Result<(), ZakatError> {
    if items.iter().any(|item| item.value < Decimal::ZERO) {
        return Err(ZakatError::InvalidRequest(format!(
            "{name}: value must be non-negative"
        )));
    }
    Ok(())
}

/// Outcome of a property calculation. `zakat_value` is zero whenever the
/// savings did not clear the Nisab threshold, regardless of the raw 2.5%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyZakat {
    pub zakat_value: Decimal,
    pub nisab_value: bool,
    pub currency: String,
}

/// Runs the property calculation against one price session.
///
/// Liabilities in `taxes_value` reduce the zakatable base before the rate
/// is applied. A request that computes to exactly zero Zakat is rejected
/// with [`ZakatError::EmptyAssets`] before the Nisab price is ever fetched.
pub async fn calculate<F: PriceFeed>(
    session: &mut RateSession<'_, F>,
    config: &ZakatConfig,
    request: &PropertyRequest,
) -> Result<PropertyZakat, ZakatError> {
    request.validate()?;

    let currency = request
        .currency
        .as_deref()
        .unwrap_or(&config.default_currency);

    let mut savings = Decimal::ZERO;
    for (_, items) in request.additive_categories() {
        for item in items {
            let code = resolve_currency_code(&item.currency_code, currency);
            savings += session.convert(currency, code, item.value).await?;
        }
    }

    for item in &request.taxes_value {
        let code = resolve_currency_code(&item.currency_code, currency);
        savings -= session.convert(currency, code, item.value).await?;
    }

    for item in &request.silver_jewelry {
        savings += price_metal_item(session, Metal::Silver, item, currency).await?;
    }
    for item in &request.gold_jewelry {
        savings += price_metal_item(session, Metal::Gold, item, currency).await?;
    }

    let zakat_value = savings * RATE;
    if zakat_value.is_zero() {
        return Err(ZakatError::EmptyAssets);
    }

    let threshold = nisab_threshold(session, config, currency).await?;
    let nisab_met = savings > threshold;
    tracing::debug!(%savings, %threshold, nisab_met, currency, "property zakat computed");

    Ok(PropertyZakat {
        zakat_value: if nisab_met { zakat_value } else { Decimal::ZERO },
        nisab_value: nisab_met,
        currency: currency.to_string(),
    })
}

/// Values one jewelry item: mass to grams, purity discount, live per-gram
/// price in the target currency.
pub(crate) async fn price_metal_item<F: PriceFeed>(
    session: &mut RateSession<'_, F>,
    metal: Metal,
    item: &PreciousMetalItem,
    currency: &str,
) -> Result<Decimal, ZakatError> {
    let grams = item.measurement_unit.to_grams(item.value);
    let pure_grams = grams * purity_multiplier(metal, &item.qarat);
    let per_gram = session.metal_price_per_gram(metal, currency).await?;
    Ok(pure_grams * per_gram)
}

/// Nisab threshold in `currency`: the live silver price per gram times the
/// configured silver weight.
pub(crate) async fn nisab_threshold<F: PriceFeed>(
    session: &mut RateSession<'_, F>,
    config: &ZakatConfig,
    currency: &str,
) -> Result<Decimal, ZakatError> {
    let silver_per_gram = session.metal_price_per_gram(Metal::Silver, currency).await?;
    Ok(silver_per_gram * config.get_nisab_silver_grams())
}
