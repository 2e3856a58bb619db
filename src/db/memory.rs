use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::BookingStore;
use crate::entities::{Booking, NewBooking};
use crate::error::Error;

#[derive(Default)]
struct Ledger {
    next_id: i64,
    bookings: Vec<Booking>,
}

/// In-process store with the same ordering guarantees as `PgStore`. Every
/// call takes the lock once, so inserts and reads are atomic.
#[derive(Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.ledger.lock().await.bookings.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    #[tracing::instrument(skip(self))]
    async fn insert_booking(&self, booking: &NewBooking, fare: Decimal) -> Result<Booking, Error> {
        let mut ledger = self.ledger.lock().await;

        // never behind the previous booking, even if the wall clock steps back
        let now = Utc::now();
        let created_at = ledger
            .bookings
            .last()
            .map_or(now, |last| last.created_at.max(now));

        ledger.next_id += 1;
        let stored = Booking::persisted(ledger.next_id, booking, fare, created_at);
        ledger.bookings.push(stored.clone());

        Ok(stored)
    }

    #[tracing::instrument(skip(self))]
    async fn recent_bookings(&self, limit: usize) -> Result<Vec<Booking>, Error> {
        let ledger = self.ledger.lock().await;

        // kept in insertion order, which is id order
        Ok(ledger.bookings.iter().rev().take(limit).cloned().collect())
    }

    async fn ping(&self) -> Result<(), Error> {
        Ok(())
    }
}
