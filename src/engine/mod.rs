mod booking_api;
mod fare_api;
mod health_api;

use std::sync::Arc;

use crate::{api::API, db::BookingStore, entities::FareTable};

type Store = Arc<dyn BookingStore + Send + Sync>;

/// Fare engine and booking ledger over a pluggable store. Holds no state of
/// its own besides the immutable fare table.
pub struct Engine {
    fares: FareTable,
    store: Store,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new<S>(store: S, fares: FareTable) -> Self
    where
        S: BookingStore + Send + Sync + 'static,
    {
        Self::with_store(Arc::new(store), fares)
    }

    pub fn with_store(store: Store, fares: FareTable) -> Self {
        tracing::info!(
            categories = fares.rules().len(),
            minimum_fare = %fares.minimum_fare(),
            "engine ready"
        );

        Self { fares, store }
    }
}

impl API for Engine {}
