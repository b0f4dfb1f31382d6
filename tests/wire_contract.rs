//! The request/response field names and defaults are the interop contract
//! with existing callers; these tests pin them at the JSON level.

use rust_decimal_macros::dec;
use serde_json::json;
use zakat_engine::prelude::*;

#[test]
fn livestock_request_uses_the_camel_case_horse_flags() {
    let request: LivestockRequest = serde_json::from_value(json!({
        "camels": 6,
        "horses_value": "1000",
        "isFemale_horses": true,
        "isForSale_horses": true
    }))
    .unwrap();

    assert_eq!(request.camels, 6);
    assert_eq!(request.horses_value, dec!(1000));
    assert!(request.is_female_horses);
    assert!(request.is_for_sale_horses);

    // Omitted species default to zero and flags to false.
    let request: LivestockRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(request, LivestockRequest::default());
}

#[test]
fn animal_serializes_its_species_under_type() {
    let animal = Animal {
        kind: "Sheep".to_string(),
        quantity: 1,
        age: 1,
    };
    assert_eq!(
        serde_json::to_value(&animal).unwrap(),
        json!({"type": "Sheep", "quantity": 1, "age": 1})
    );
}

#[test]
fn precious_metal_item_defaults() {
    let item: PreciousMetalItem = serde_json::from_value(json!({"value": 100})).unwrap();
    assert_eq!(item.value, dec!(100));
    assert_eq!(item.measurement_unit, MassUnit::Grams);
    assert_eq!(item.qarat, "999");
}

#[test]
fn unrecognized_mass_unit_reads_as_grams() {
    let item: PreciousMetalItem =
        serde_json::from_value(json!({"value": 1, "measurement_unit": "pood"})).unwrap();
    assert_eq!(item.measurement_unit, MassUnit::Grams);

    let item: PreciousMetalItem =
        serde_json::from_value(json!({"value": 1, "measurement_unit": "oz"})).unwrap();
    assert_eq!(item.measurement_unit, MassUnit::TroyOunces);
}

#[test]
fn property_request_accepts_a_minimal_body() {
    let request: PropertyRequest = serde_json::from_value(json!({
        "cash": [{"currency_code": "USD", "value": "1000"}]
    }))
    .unwrap();

    assert_eq!(request.cash.len(), 1);
    assert_eq!(request.currency, None);
    assert!(request.taxes_value.is_empty());
    assert!(request.gold_jewelry.is_empty());
}

#[test]
fn property_result_shape() {
    let result = PropertyZakat {
        zakat_value: dec!(25.0),
        nisab_value: true,
        currency: "USD".to_string(),
    };
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["zakat_value"], json!("25.0"));
    assert_eq!(value["nisab_value"], json!(true));
    assert_eq!(value["currency"], json!("USD"));
}

#[test]
fn ushr_round_trip_keeps_crop_type_key() {
    let request: UshrRequest = serde_json::from_value(json!({
        "crops": [{"type": "wheat", "quantity": 1000}],
        "is_ushr_land": true,
        "is_irrigated": false
    }))
    .unwrap();
    assert_eq!(request.crops[0].kind, "wheat");

    let result = zakat_engine::ushr::calculate(&request);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["zakat_ushr_value"][0]["type"], json!("wheat"));
    assert_eq!(value["zakat_ushr_value"][0]["quantity"], json!("100.00"));
}
