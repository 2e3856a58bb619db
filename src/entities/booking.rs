use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{Category, RouteMetrics};

/// Validated input of a booking write. Coordinates are optional because
/// geocoding may have failed upstream.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBooking {
    pub pickup_address: String,
    pub dropoff_address: String,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub metrics: RouteMetrics,
    pub category: Category,
    /// Fare the client was shown, if any.
    pub quoted_fare: Option<Decimal>,
}

impl NewBooking {
    pub fn new(
        pickup_address: impl Into<String>,
        dropoff_address: impl Into<String>,
        metrics: RouteMetrics,
        category: Category,
    ) -> Self {
        Self {
            pickup_address: pickup_address.into(),
            dropoff_address: dropoff_address.into(),
            pickup_lat: None,
            pickup_lng: None,
            dropoff_lat: None,
            dropoff_lng: None,
            metrics,
            category,
            quoted_fare: None,
        }
    }

    pub fn with_pickup_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.pickup_lat = Some(lat);
        self.pickup_lng = Some(lng);
        self
    }

    pub fn with_dropoff_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.dropoff_lat = Some(lat);
        self.dropoff_lng = Some(lng);
        self
    }

    pub fn with_quoted_fare(mut self, fare: Decimal) -> Self {
        self.quoted_fare = Some(fare);
        self
    }

    pub fn has_addresses(&self) -> bool {
        !(self.pickup_address.trim().is_empty() || self.dropoff_address.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_min: Decimal,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub fare: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Builds the stored form of `new` once the store has assigned its
    /// identity and timestamp.
    pub fn persisted(id: i64, new: &NewBooking, fare: Decimal, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            pickup_address: new.pickup_address.clone(),
            dropoff_address: new.dropoff_address.clone(),
            pickup_lat: new.pickup_lat,
            pickup_lng: new.pickup_lng,
            dropoff_lat: new.dropoff_lat,
            dropoff_lng: new.dropoff_lng,
            distance_km: new.metrics.distance_km,
            duration_min: new.metrics.duration_min,
            category: new.category,
            fare,
            created_at,
        }
    }

    pub fn metrics(&self) -> RouteMetrics {
        RouteMetrics::new(self.distance_km, self.duration_min)
    }
}
