use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::entities::{Booking, Category, FareQuote, FareTable, NewBooking, RouteMetrics};
use crate::error::Error;

pub trait FareAPI {
    fn fare_rules(&self) -> &FareTable;

    fn compute_fare(&self, category: Category, metrics: &RouteMetrics) -> Result<Decimal, Error>;

    fn quote_fare(&self, category: Category, metrics: &RouteMetrics) -> Result<FareQuote, Error>;

    /// One quote per category, in `Category::ALL` order.
    fn price_table(&self, metrics: &RouteMetrics) -> Result<Vec<FareQuote>, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, Error>;

    async fn list_recent_bookings(&self, limit: usize) -> Result<Vec<Booking>, Error>;
}

#[async_trait]
pub trait HealthAPI {
    async fn health(&self) -> Result<(), Error>;
}

pub trait API: FareAPI + BookingAPI + HealthAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
