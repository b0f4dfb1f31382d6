//! Zakat on livestock: per-species bracket tables for camels, cows,
//! buffaloes, sheep, and goats, plus the value-based rule for horses.
//!
//! Each species has an ordered table of `(min, max, animals due)` rows and
//! a first-match lookup. Tables are data, not control flow, so every band
//! boundary and the open-ended catch-all are visible rows that can be
//! tested one by one.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::ZakatError;

const RATE: Decimal = dec!(0.025);

const CAMEL: &str = "Camel";
const COW: &str = "Cow";
const BUFFALO: &str = "Buffaloe";
const SHEEP: &str = "Sheep";
const GOAT: &str = "Goat";

/// Herd sizes below these counts owe nothing for that species. The camel
/// bound is exclusive: a herd of exactly 5 does not qualify, the smaller
/// ruminants qualify at their bound exactly.
const CAMEL_NISAB: u32 = 6;
const CATTLE_NISAB: u32 = 30;
const FLOCK_NISAB: u32 = 40;

/// Herd counts per species. `horses_value` is the monetary worth of the
/// horses; the two flags decide whether they attract Zakat at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LivestockRequest {
    #[serde(default)]
    pub camels: u32,
    #[serde(default)]
    pub cows: u32,
    #[serde(default)]
    pub buffaloes: u32,
    #[serde(default)]
    pub sheep: u32,
    #[serde(default)]
    pub goats: u32,
    #[serde(default)]
    pub horses_value: Decimal,
    #[serde(default, rename = "isFemale_horses")]
    pub is_female_horses: bool,
    #[serde(default, rename = "isForSale_horses")]
    pub is_for_sale_horses: bool,
}

/// One row of animals due. `age` is the age category within the species;
/// 0 means unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u32,
    #[serde(default)]
    pub age: u32,
}

impl Animal {
    fn new(kind: &str, quantity: u32, age: u32) -> Self {
        Self {
            kind: kind.to_string(),
            quantity,
            age,
        }
    }
}

/// Animals due across all species, in request order, plus the monetary
/// Zakat on horses. `nisab_status` is true when any species cleared its
/// own threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestockZakat {
    pub animals: Vec<Animal>,
    pub value_for_horses: Decimal,
    pub nisab_status: bool,
}

struct Due {
    kind: &'static str,
    quantity: u32,
    age: u32,
}

/// Inclusive count band mapped to the animals it owes.
struct Bracket {
    min: u32,
    max: u32,
    due: &'static [Due],
}

/// Camel bands. Counts of 121 and above owe combinations; the final row is
/// the explicit catch-all for herds past the last enumerated band.
const CAMEL_BRACKETS: &[Bracket] = &[
    Bracket { min: 6, max: 9, due: &[Due { kind: SHEEP, quantity: 1, age: 1 }] },
    Bracket { min: 10, max: 14, due: &[Due { kind: SHEEP, quantity: 2, age: 0 }] },
    Bracket { min: 15, max: 19, due: &[Due { kind: SHEEP, quantity: 3, age: 0 }] },
    Bracket { min: 20, max: 24, due: &[Due { kind: SHEEP, quantity: 4, age: 0 }] },
    Bracket { min: 25, max: 35, due: &[Due { kind: CAMEL, quantity: 1, age: 1 }] },
    Bracket { min: 36, max: 45, due: &[Due { kind: CAMEL, quantity: 1, age: 2 }] },
    Bracket { min: 46, max: 60, due: &[Due { kind: CAMEL, quantity: 1, age: 4 }] },
    Bracket { min: 61, max: 75, due: &[Due { kind: CAMEL, quantity: 1, age: 5 }] },
    Bracket { min: 76, max: 90, due: &[Due { kind: CAMEL, quantity: 2, age: 1 }] },
    Bracket { min: 91, max: 120, due: &[Due { kind: CAMEL, quantity: 2, age: 4 }] },
    Bracket {
        min: 121,
        max: 129,
        due: &[
            Due { kind: CAMEL, quantity: 1, age: 4 },
            Due { kind: SHEEP, quantity: 1, age: 0 },
        ],
    },
    Bracket {
        min: 130,
        max: 134,
        due: &[
            Due { kind: CAMEL, quantity: 2, age: 4 },
            Due { kind: SHEEP, quantity: 2, age: 0 },
        ],
    },
    Bracket {
        min: 135,
        max: 139,
        due: &[
            Due { kind: CAMEL, quantity: 2, age: 4 },
            Due { kind: SHEEP, quantity: 3, age: 0 },
        ],
    },
    Bracket {
        min: 140,
        max: 144,
        due: &[
            Due { kind: CAMEL, quantity: 2, age: 4 },
            Due { kind: SHEEP, quantity: 4, age: 0 },
        ],
    },
    Bracket {
        min: 145,
        max: 149,
        due: &[
            Due { kind: CAMEL, quantity: 2, age: 4 },
            Due { kind: CAMEL, quantity: 1, age: 1 },
        ],
    },
    Bracket { min: 150, max: 154, due: &[Due { kind: CAMEL, quantity: 3, age: 4 }] },
    Bracket {
        min: 155,
        max: 159,
        due: &[
            Due { kind: CAMEL, quantity: 3, age: 4 },
            Due { kind: SHEEP, quantity: 1, age: 0 },
        ],
    },
    Bracket { min: 160, max: u32::MAX, due: &[Due { kind: CAMEL, quantity: 6, age: 1 }] },
];

struct CattleDue {
    quantity: u32,
    age: u32,
}

struct CattleBracket {
    min: u32,
    max: u32,
    due: &'static [CattleDue],
}

/// Shared by cows and buffaloes, which mirror each other exactly. There is
/// no band above 109: such herds owe nothing under the current rules.
const CATTLE_BRACKETS: &[CattleBracket] = &[
    CattleBracket { min: 30, max: 39, due: &[CattleDue { quantity: 1, age: 1 }] },
    CattleBracket { min: 40, max: 59, due: &[CattleDue { quantity: 1, age: 2 }] },
    CattleBracket { min: 60, max: 69, due: &[CattleDue { quantity: 2, age: 1 }] },
    CattleBracket {
        min: 70,
        max: 79,
        due: &[
            CattleDue { quantity: 1, age: 1 },
            CattleDue { quantity: 1, age: 2 },
        ],
    },
    CattleBracket { min: 80, max: 89, due: &[CattleDue { quantity: 2, age: 2 }] },
    CattleBracket { min: 90, max: 99, due: &[CattleDue { quantity: 3, age: 1 }] },
    CattleBracket {
        min: 100,
        max: 109,
        due: &[
            CattleDue { quantity: 2, age: 1 },
            CattleDue { quantity: 1, age: 2 },
        ],
    },
];

struct FlockBracket {
    min: u32,
    max: u32,
    quantity: u32,
}

/// Shared by sheep and goats. The last two bands overlap on 300-398;
/// first match wins, so that stretch owes 3. Flocks of 599 and above fall
/// past every band and owe nothing.
const FLOCK_BRACKETS: &[FlockBracket] = &[
    FlockBracket { min: 40, max: 120, quantity: 1 },
    FlockBracket { min: 121, max: 200, quantity: 2 },
    FlockBracket { min: 201, max: 398, quantity: 3 },
    FlockBracket { min: 300, max: 598, quantity: 4 },
];

fn camel_due(count: u32) -> Vec<Animal> {
    CAMEL_BRACKETS
        .iter()
        .find(|b| count >= b.min && count <= b.max)
        .map(|b| {
            b.due
                .iter()
                .map(|d| Animal::new(d.kind, d.quantity, d.age))
                .collect()
        })
        .unwrap_or_default()
}

fn cattle_due(kind: &str, count: u32) -> Vec<Animal> {
    CATTLE_BRACKETS
        .iter()
        .find(|b| count >= b.min && count <= b.max)
        .map(|b| {
            b.due
                .iter()
                .map(|d| Animal::new(kind, d.quantity, d.age))
                .collect()
        })
        .unwrap_or_default()
}

fn flock_due(kind: &str, count: u32) -> Vec<Animal> {
    FLOCK_BRACKETS
        .iter()
        .find(|b| count >= b.min && count <= b.max)
        .map(|b| vec![Animal::new(kind, b.quantity, 0)])
        .unwrap_or_default()
}

/// Runs the livestock calculation. Purely local: no price feed involved.
///
/// Horses are zakatable only when they are female and held for sale;
/// otherwise the same animals fall under ordinary resale merchandise and
/// are excluded here entirely.
pub fn calculate(request: &LivestockRequest) -> Result<LivestockZakat, ZakatError> {
    if request.horses_value < Decimal::ZERO {
        return Err(ZakatError::InvalidRequest(
            "horses_value must be non-negative".to_string(),
        ));
    }

    let mut animals = Vec::new();
    let mut nisab_status = false;

    if request.camels >= CAMEL_NISAB {
        nisab_status = true;
        animals.extend(camel_due(request.camels));
    }
    if request.cows >= CATTLE_NISAB {
        nisab_status = true;
        animals.extend(cattle_due(COW, request.cows));
    }
    if request.buffaloes >= CATTLE_NISAB {
        nisab_status = true;
        animals.extend(cattle_due(BUFFALO, request.buffaloes));
    }
    if request.sheep >= FLOCK_NISAB {
        nisab_status = true;
        animals.extend(flock_due(SHEEP, request.sheep));
    }
    if request.goats >= FLOCK_NISAB {
        nisab_status = true;
        animals.extend(flock_due(GOAT, request.goats));
    }

    let horses_zakatable = request.is_female_horses
        && request.is_for_sale_horses
        && request.horses_value > Decimal::ZERO;
    let value_for_horses = if horses_zakatable {
        nisab_status = true;
        (request.horses_value * RATE).floor()
    } else {
        Decimal::ZERO
    };

    Ok(LivestockZakat {
        animals,
        value_for_horses,
        nisab_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herd(camels: u32) -> LivestockRequest {
        LivestockRequest {
            camels,
            ..Default::default()
        }
    }

    #[test]
    fn five_camels_owe_nothing() {
        // The camel lower bound is exclusive.
        let result = calculate(&herd(5)).unwrap();
        assert!(result.animals.is_empty());
        assert!(!result.nisab_status);
    }

    #[test]
    fn six_camels_owe_one_sheep() {
        let result = calculate(&herd(6)).unwrap();
        assert_eq!(result.animals, vec![Animal::new(SHEEP, 1, 1)]);
        assert!(result.nisab_status);
    }

    #[test]
    fn camel_combination_band() {
        // 121-129 owes a camel and a sheep together.
        let result = calculate(&herd(125)).unwrap();
        assert_eq!(
            result.animals,
            vec![Animal::new(CAMEL, 1, 4), Animal::new(SHEEP, 1, 0)]
        );

        let result = calculate(&herd(130)).unwrap();
        assert_eq!(
            result.animals,
            vec![Animal::new(CAMEL, 2, 4), Animal::new(SHEEP, 2, 0)]
        );
    }

    #[test]
    fn camel_catch_all_band() {
        for count in [160, 500, 10_000] {
            let result = calculate(&herd(count)).unwrap();
            assert_eq!(result.animals, vec![Animal::new(CAMEL, 6, 1)]);
        }
        // The band below the catch-all still owes the combination.
        let result = calculate(&herd(159)).unwrap();
        assert_eq!(
            result.animals,
            vec![Animal::new(CAMEL, 3, 4), Animal::new(SHEEP, 1, 0)]
        );
    }

    #[test]
    fn cow_lower_bound_is_inclusive() {
        let request = LivestockRequest {
            cows: 30,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert_eq!(result.animals, vec![Animal::new(COW, 1, 1)]);
        assert!(result.nisab_status);

        let request = LivestockRequest {
            cows: 29,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert!(result.animals.is_empty());
        assert!(!result.nisab_status);
    }

    #[test]
    fn buffaloes_mirror_cows() {
        let request = LivestockRequest {
            cows: 70,
            buffaloes: 70,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert_eq!(
            result.animals,
            vec![
                Animal::new(COW, 1, 1),
                Animal::new(COW, 1, 2),
                Animal::new(BUFFALO, 1, 1),
                Animal::new(BUFFALO, 1, 2),
            ]
        );
    }

    #[test]
    fn cattle_above_last_band_owe_nothing() {
        // No band exists past 109; the herd still clears the threshold.
        let request = LivestockRequest {
            cows: 110,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert!(result.animals.is_empty());
        assert!(result.nisab_status);
    }

    #[test]
    fn flock_band_overlap_resolves_to_first_match() {
        // 300-398 sits in both of the last two bands; the earlier row wins.
        let request = LivestockRequest {
            sheep: 350,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert_eq!(result.animals, vec![Animal::new(SHEEP, 3, 0)]);

        let request = LivestockRequest {
            sheep: 399,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert_eq!(result.animals, vec![Animal::new(SHEEP, 4, 0)]);
    }

    #[test]
    fn flock_past_every_band_owes_nothing() {
        let request = LivestockRequest {
            goats: 599,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert!(result.animals.is_empty());
        assert!(result.nisab_status);
    }

    #[test]
    fn horses_require_both_flags() {
        let base = LivestockRequest {
            horses_value: dec!(1000),
            is_female_horses: true,
            is_for_sale_horses: true,
            ..Default::default()
        };

        let result = calculate(&base).unwrap();
        // 1000 * 0.025 = 25.
        assert_eq!(result.value_for_horses, dec!(25));
        assert!(result.nisab_status);

        for (female, for_sale) in [(false, true), (true, false), (false, false)] {
            let request = LivestockRequest {
                is_female_horses: female,
                is_for_sale_horses: for_sale,
                ..base.clone()
            };
            let result = calculate(&request).unwrap();
            assert_eq!(result.value_for_horses, Decimal::ZERO);
            assert!(!result.nisab_status);
        }
    }

    #[test]
    fn horse_value_is_floored() {
        let request = LivestockRequest {
            horses_value: dec!(1001),
            is_female_horses: true,
            is_for_sale_horses: true,
            ..Default::default()
        };
        // 1001 * 0.025 = 25.025, floored to 25.
        let result = calculate(&request).unwrap();
        assert_eq!(result.value_for_horses, dec!(25));
    }

    #[test]
    fn negative_horse_value_is_rejected() {
        let request = LivestockRequest {
            horses_value: dec!(-1),
            ..Default::default()
        };
        assert!(matches!(
            calculate(&request),
            Err(ZakatError::InvalidRequest(_))
        ));
    }

    #[test]
    fn species_results_keep_request_order() {
        let request = LivestockRequest {
            camels: 6,
            sheep: 40,
            goats: 40,
            ..Default::default()
        };
        let result = calculate(&request).unwrap();
        assert_eq!(
            result.animals,
            vec![
                Animal::new(SHEEP, 1, 1),
                Animal::new(SHEEP, 1, 0),
                Animal::new(GOAT, 1, 0),
            ]
        );
    }
}
