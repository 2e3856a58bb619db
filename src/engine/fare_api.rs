use super::Engine;

use rust_decimal::Decimal;

use crate::{
    api::FareAPI,
    entities::{Category, FareQuote, FareTable, RouteMetrics},
    error::Error,
};

impl FareAPI for Engine {
    fn fare_rules(&self) -> &FareTable {
        &self.fares
    }

    #[tracing::instrument(skip(self))]
    fn compute_fare(&self, category: Category, metrics: &RouteMetrics) -> Result<Decimal, Error> {
        self.fares.compute_fare(category, metrics)
    }

    fn quote_fare(&self, category: Category, metrics: &RouteMetrics) -> Result<FareQuote, Error> {
        let fare = self.compute_fare(category, metrics)?;

        Ok(FareQuote {
            category,
            distance_km: metrics.distance_km,
            duration_min: metrics.duration_min,
            fare,
        })
    }

    fn price_table(&self, metrics: &RouteMetrics) -> Result<Vec<FareQuote>, Error> {
        Category::ALL
            .iter()
            .map(|category| self.quote_fare(*category, metrics))
            .collect()
    }
}
