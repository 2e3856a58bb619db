use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Distance and duration between pickup and dropoff as reported by the
/// routing provider. Consumed as given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_min: Decimal,
}

impl RouteMetrics {
    pub fn new(distance_km: Decimal, duration_min: Decimal) -> Self {
        Self {
            distance_km,
            duration_min,
        }
    }
}
