//! Convenience re-exports for the common calculation surface.

pub use crate::config::{NetworkConfig, ZakatConfig};
pub use crate::currency::MassUnit;
pub use crate::engine::{NisabValue, ZakatEngine};
pub use crate::livestock::{Animal, LivestockRequest, LivestockZakat};
pub use crate::pricing::{Metal, PriceFeed, RateSession, StaticPriceFeed};
pub use crate::property::{MonetaryItem, PreciousMetalItem, PropertyRequest, PropertyZakat};
pub use crate::types::ZakatError;
pub use crate::ushr::{Crop, UshrItem, UshrRequest, UshrZakat};

#[cfg(feature = "live-pricing")]
pub use crate::pricing::MetalPriceApiFeed;
