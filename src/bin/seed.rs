//! Inserts a demo booking through the ledger so a fresh database has history.

use rust_decimal::Decimal;

use farebook::api::BookingAPI;
use farebook::config::Config;
use farebook::db::PgStore;
use farebook::engine::Engine;
use farebook::entities::{Category, NewBooking, RouteMetrics};
use farebook::error::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let store = PgStore::new(&config.database_url, config.database_max_connections).await?;
    let engine = Engine::new(store, config.fare_table()?);

    let seed = NewBooking::new(
        "Seed Pickup",
        "Seed Dropoff",
        RouteMetrics::new(Decimal::new(12, 1), Decimal::new(5, 0)),
        Category::Economy,
    )
    .with_pickup_coordinates(37.7749, -122.4194)
    .with_dropoff_coordinates(37.7849, -122.4094);

    let booking = engine.create_booking(seed).await?;

    tracing::info!(id = booking.id, fare = %booking.fare, "inserted seed booking");

    Ok(())
}
