mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    Executor, Pool, Postgres, Row,
};

use crate::entities::{Booking, Category, NewBooking};
use crate::error::{storage_error, Error};

/// Backing store of the booking ledger. Implementations must make a single
/// insert and a single bounded read atomic.
#[async_trait]
pub trait BookingStore {
    /// Persists `booking` priced at `fare`, assigning its id and creation time.
    async fn insert_booking(&self, booking: &NewBooking, fare: Decimal) -> Result<Booking, Error>;

    /// Up to `limit` bookings, newest first.
    async fn recent_bookings(&self, limit: usize) -> Result<Vec<Booking>, Error>;

    async fn ping(&self) -> Result<(), Error>;
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the bookings table if missing.
    pub async fn from_pool(pool: Pool<Postgres>) -> Result<Self, Error> {
        // TODO: move this to migrations
        pool.execute(
            "CREATE TABLE IF NOT EXISTS bookings (
                id BIGSERIAL PRIMARY KEY,
                pickup_address TEXT NOT NULL,
                dropoff_address TEXT NOT NULL,
                pickup_lat DOUBLE PRECISION,
                pickup_lng DOUBLE PRECISION,
                dropoff_lat DOUBLE PRECISION,
                dropoff_lng DOUBLE PRECISION,
                distance_km NUMERIC NOT NULL,
                duration_min NUMERIC NOT NULL,
                category VARCHAR NOT NULL,
                fare NUMERIC NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await?;
        pool.execute(
            "CREATE INDEX IF NOT EXISTS bookings_created_at_idx ON bookings (created_at DESC, id DESC)",
        )
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking, Error> {
    let category: String = row.try_get("category")?;

    Ok(Booking {
        id: row.try_get("id")?,
        pickup_address: row.try_get("pickup_address")?,
        dropoff_address: row.try_get("dropoff_address")?,
        pickup_lat: row.try_get("pickup_lat")?,
        pickup_lng: row.try_get("pickup_lng")?,
        dropoff_lat: row.try_get("dropoff_lat")?,
        dropoff_lng: row.try_get("dropoff_lng")?,
        distance_km: row.try_get("distance_km")?,
        duration_min: row.try_get("duration_min")?,
        category: category
            .parse::<Category>()
            .map_err(|_| storage_error(format!("stored booking has unknown category {:?}", category)))?,
        fare: row.try_get("fare")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl BookingStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn insert_booking(&self, booking: &NewBooking, fare: Decimal) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_one(
                sqlx::query(
                    "INSERT INTO bookings (
                        pickup_address, dropoff_address, pickup_lat, pickup_lng, dropoff_lat, dropoff_lng,
                        distance_km, duration_min, category, fare
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    RETURNING *",
                )
                .bind(&booking.pickup_address)
                .bind(&booking.dropoff_address)
                .bind(booking.pickup_lat)
                .bind(booking.pickup_lng)
                .bind(booking.dropoff_lat)
                .bind(booking.dropoff_lng)
                .bind(booking.metrics.distance_km)
                .bind(booking.metrics.duration_min)
                .bind(booking.category.name())
                .bind(fare),
            )
            .await?;

        booking_from_row(&row)
    }

    #[tracing::instrument(skip(self))]
    async fn recent_bookings(&self, limit: usize) -> Result<Vec<Booking>, Error> {
        let mut conn = self.pool.acquire().await?;

        let rows = conn
            .fetch_all(
                sqlx::query("SELECT * FROM bookings ORDER BY created_at DESC, id DESC LIMIT $1")
                    .bind(sql_limit(limit)),
            )
            .await?;

        rows.iter().map(booking_from_row).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn ping(&self) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;
        conn.execute("SELECT 1").await?;

        Ok(())
    }
}

/// `LIMIT` takes a BIGINT; anything beyond it means unbounded anyway.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[test]
fn limit_saturates_instead_of_wrapping() {
    assert_eq!(sql_limit(50), 50);
    assert_eq!(sql_limit(usize::MAX), i64::MAX);
}

#[test]
#[ignore = "needs a postgres instance at DATABASE_URL"]
fn pg_store_round_trip() {
    use crate::entities::RouteMetrics;
    use rust_decimal_macros::dec;
    use tokio_test::block_on;

    let uri = std::env::var("DATABASE_URL").unwrap();
    let store = block_on(PgStore::new(&uri, 2)).unwrap();

    block_on(store.ping()).unwrap();

    let new = NewBooking::new(
        "Pg Pickup",
        "Pg Dropoff",
        RouteMetrics::new(dec!(1.2), dec!(5)),
        Category::Economy,
    )
    .with_dropoff_coordinates(37.7849, -122.4094);
    let stored = block_on(store.insert_booking(&new, dec!(5.08))).unwrap();

    assert_eq!(stored.fare, dec!(5.08));
    assert_eq!(stored.pickup_lat, None);
    assert_eq!(stored.dropoff_lat, Some(37.7849));

    let recent = block_on(store.recent_bookings(1)).unwrap();
    assert_eq!(recent[0].id, stored.id);
}
