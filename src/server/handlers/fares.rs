use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::entities::{Category, FareQuote, FareTable};
use crate::error::Error;
use crate::server::params::query_metrics;
use crate::server::DynAPI;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareParams {
    pub category: Option<String>,
    pub distance_km: Option<String>,
    pub duration_min: Option<String>,
}

impl FareParams {
    fn category(&self) -> Result<Category, Error> {
        match self.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse(),
            _ => Ok(Category::default()),
        }
    }
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FareParams>,
) -> Result<Json<FareQuote>, Error> {
    let category = params.category()?;
    let metrics = query_metrics(params.distance_km.as_deref(), params.duration_min.as_deref())?;

    let quote = api.quote_fare(category, &metrics)?;

    Ok(quote.into())
}

pub async fn table(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FareParams>,
) -> Result<Json<Vec<FareQuote>>, Error> {
    let metrics = query_metrics(params.distance_km.as_deref(), params.duration_min.as_deref())?;

    let quotes = api.price_table(&metrics)?;

    Ok(quotes.into())
}

pub async fn rules(Extension(api): Extension<DynAPI>) -> Json<FareTable> {
    api.fare_rules().clone().into()
}
