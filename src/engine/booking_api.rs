use super::Engine;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    api::{BookingAPI, FareAPI},
    entities::{Booking, NewBooking},
    error::{fare_mismatch_error, missing_addresses_error, Error},
};

/// Largest accepted gap between a client-quoted fare and the server fare.
/// Clients price from unrounded metrics but submit them at 2 decimals, so
/// under the reference table the two fares can drift by up to 0.02.
pub const QUOTED_FARE_TOLERANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, Error> {
        if !booking.has_addresses() {
            tracing::warn!("rejecting booking without addresses");
            return Err(missing_addresses_error());
        }

        // the server is authoritative for price, a quoted fare is only checked
        let fare = self.compute_fare(booking.category, &booking.metrics)?;

        if let Some(quoted) = booking.quoted_fare {
            if (quoted - fare).abs() > QUOTED_FARE_TOLERANCE {
                tracing::warn!(%quoted, %fare, "rejecting booking with stale or tampered fare");
                return Err(fare_mismatch_error());
            }
        }

        let stored = self.store.insert_booking(&booking, fare).await?;

        tracing::info!(id = stored.id, %fare, "booking persisted");

        Ok(stored)
    }

    #[tracing::instrument(skip(self))]
    async fn list_recent_bookings(&self, limit: usize) -> Result<Vec<Booking>, Error> {
        self.store.recent_bookings(limit).await
    }
}
