use axum::body::Bytes;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{Booking, Category, NewBooking, RouteMetrics};
use crate::error::{
    invalid_category_error, invalid_input_error, missing_addresses_error, missing_field_error, Error,
};
use crate::server::params::{
    json_amount, json_coordinate, json_text, LATITUDE_LIMIT, LONGITUDE_LIMIT,
};
use crate::server::DynAPI;

pub const RECENT_BOOKINGS_LIMIT: usize = 50;

/// Raw booking body. Every field is kept loosely typed so that type errors
/// come back as our own `{code, error}` responses.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateParams {
    pub pickup_address: Option<Value>,
    pub dropoff_address: Option<Value>,
    pub pickup_lat: Option<Value>,
    pub pickup_lng: Option<Value>,
    pub dropoff_lat: Option<Value>,
    pub dropoff_lng: Option<Value>,
    pub distance_km: Option<Value>,
    pub duration_min: Option<Value>,
    pub category: Option<Value>,
    pub fare: Option<Value>,
}

impl CreateParams {
    /// Parses a request body, which must be a JSON object.
    pub fn from_slice(raw: &[u8]) -> Result<Self, Error> {
        match serde_json::from_slice(raw) {
            Ok(Value::Object(fields)) => {
                serde_json::from_value(Value::Object(fields)).map_err(|_| invalid_input_error("body"))
            }
            _ => Err(invalid_input_error("body")),
        }
    }
}

impl TryFrom<CreateParams> for NewBooking {
    type Error = Error;

    fn try_from(params: CreateParams) -> Result<Self, Self::Error> {
        let pickup_address =
            json_text("pickup_address", params.pickup_address.as_ref())?.unwrap_or_default();
        let dropoff_address =
            json_text("dropoff_address", params.dropoff_address.as_ref())?.unwrap_or_default();

        if pickup_address.trim().is_empty() || dropoff_address.trim().is_empty() {
            return Err(missing_addresses_error());
        }

        let category: Category = match params.category {
            Some(Value::String(name)) => name.trim().parse()?,
            Some(_) => return Err(invalid_category_error()),
            None => return Err(missing_field_error("category")),
        };

        let metrics = RouteMetrics::new(
            json_amount("distance_km", params.distance_km.as_ref())?
                .ok_or_else(|| missing_field_error("distance_km"))?,
            json_amount("duration_min", params.duration_min.as_ref())?
                .ok_or_else(|| missing_field_error("duration_min"))?,
        );

        Ok(NewBooking {
            pickup_address,
            dropoff_address,
            pickup_lat: json_coordinate("pickup_lat", params.pickup_lat.as_ref(), LATITUDE_LIMIT)?,
            pickup_lng: json_coordinate("pickup_lng", params.pickup_lng.as_ref(), LONGITUDE_LIMIT)?,
            dropoff_lat: json_coordinate("dropoff_lat", params.dropoff_lat.as_ref(), LATITUDE_LIMIT)?,
            dropoff_lng: json_coordinate("dropoff_lng", params.dropoff_lng.as_ref(), LONGITUDE_LIMIT)?,
            metrics,
            category,
            quoted_fare: json_amount("fare", params.fare.as_ref())?,
        })
    }
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    body: Bytes,
) -> Result<(StatusCode, Json<Booking>), Error> {
    let params = CreateParams::from_slice(&body)?;
    let booking = api.create_booking(params.try_into()?).await?;

    Ok((StatusCode::CREATED, booking.into()))
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Booking>>, Error> {
    let bookings = api.list_recent_bookings(RECENT_BOOKINGS_LIMIT).await?;

    Ok(bookings.into())
}
