mod handlers;
mod params;

pub use handlers::bookings::RECENT_BOOKINGS_LIMIT;

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::API;
use crate::config::Config;
use crate::error::{config_error, unexpected_error, Error};
use crate::server::handlers::{bookings, fares, health};

pub use crate::api::DynAPI;

pub fn router(api: DynAPI, allow_origin: &str) -> Result<Router, Error> {
    let routes = Router::new()
        .route("/health", get(health::check))
        .route("/fare", get(fares::find))
        .route("/fares", get(fares::table))
        .route("/fare-rules", get(fares::rules))
        .route("/bookings", get(bookings::list).post(bookings::create));

    Ok(Router::new()
        .nest("/api", routes)
        .layer(Extension(api))
        .layer(cors(allow_origin)?))
}

fn cors(allow_origin: &str) -> Result<CorsLayer, Error> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if allow_origin.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let origin = HeaderValue::from_str(allow_origin.trim())
        .map_err(|_| config_error(format!("invalid ALLOW_ORIGIN {:?}", allow_origin)))?;

    Ok(layer.allow_origin(origin))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, config: &Config) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api, &config.allow_origin)?;

    let addr = config.socket_addr()?;

    tracing::info!("listening on http://{}", addr);

    axum::Server::try_bind(&addr)
        .map_err(unexpected_error)?
        .serve(app.into_make_service())
        .await
        .map_err(unexpected_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Bytes;
    use axum::extract::{Json, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tokio_test::block_on;

    use crate::db::MemoryStore;
    use crate::engine::Engine;
    use crate::entities::{Category, FareTable};
    use crate::error::{INVALID_CATEGORY, INVALID_INPUT, MISSING_FIELD};

    use super::handlers::fares::FareParams;

    fn api() -> DynAPI {
        Arc::new(Engine::new(MemoryStore::new(), FareTable::standard()))
    }

    fn booking_body(body: serde_json::Value) -> Bytes {
        Bytes::from(body.to_string())
    }

    #[test]
    fn fare_defaults_to_economy_at_zero() {
        let Json(quote) =
            block_on(fares::find(Extension(api()), Query(FareParams::default()))).unwrap();

        assert_eq!(quote.category, Category::Economy);
        assert_eq!(quote.distance_km, dec!(0));
        assert_eq!(quote.fare, dec!(3.00));
    }

    #[test]
    fn fare_for_query() {
        let params = FareParams {
            category: Some("premium".into()),
            distance_km: Some("0.1".into()),
            duration_min: Some("0.1".into()),
        };

        let Json(quote) = block_on(fares::find(Extension(api()), Query(params))).unwrap();

        assert_eq!(quote.fare, dec!(5.18));
    }

    #[test]
    fn fare_rejects_bad_query() {
        let params = FareParams {
            category: Some("luxury".into()),
            ..FareParams::default()
        };
        let err = block_on(fares::find(Extension(api()), Query(params))).unwrap_err();
        assert_eq!(err.code, INVALID_CATEGORY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let params = FareParams {
            distance_km: Some("ten".into()),
            ..FareParams::default()
        };
        let err = block_on(fares::find(Extension(api()), Query(params))).unwrap_err();
        assert_eq!(err.code, INVALID_INPUT);
    }

    #[test]
    fn price_table_for_query() {
        let params = FareParams {
            distance_km: Some("10".into()),
            duration_min: Some("20".into()),
            ..FareParams::default()
        };

        let Json(quotes) = block_on(fares::table(Extension(api()), Query(params))).unwrap();

        assert_eq!(quotes.len(), Category::ALL.len());
        assert_eq!(quotes[0].fare, dec!(16.00));
    }

    #[test]
    fn fare_rules_are_exposed() {
        let Json(table) = block_on(fares::rules(Extension(api())));

        assert_eq!(table, FareTable::standard());
    }

    #[test]
    fn create_then_list_bookings() {
        let api = api();
        let body = booking_body(json!({
            "pickup_address": "Main St 1",
            "dropoff_address": "Airport",
            "pickup_lat": 37.7749,
            "pickup_lng": "-122.4194",
            "dropoff_lat": null,
            "distance_km": 10,
            "duration_min": "20",
            "category": "economy",
            "fare": 16
        }));

        let (status, Json(created)) =
            block_on(bookings::create(Extension(api.clone()), body)).unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.fare, dec!(16));
        assert_eq!(created.pickup_lng, Some(-122.4194));
        assert_eq!(created.dropoff_lat, None);

        let Json(listed) = block_on(bookings::list(Extension(api))).unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn create_booking_rejects_bad_bodies() {
        let cases = [
            (json!({ "dropoff_address": "X", "distance_km": 1, "duration_min": 1, "category": "xl" }), MISSING_FIELD),
            (json!({ "pickup_address": "A", "dropoff_address": "B", "distance_km": 1, "duration_min": 1 }), MISSING_FIELD),
            (json!({ "pickup_address": "A", "dropoff_address": "B", "duration_min": 1, "category": "xl" }), MISSING_FIELD),
            (json!({ "pickup_address": "A", "dropoff_address": "B", "distance_km": "far", "duration_min": 1, "category": "xl" }), INVALID_INPUT),
            (json!({ "pickup_address": "A", "dropoff_address": "B", "distance_km": -4, "duration_min": 1, "category": "xl" }), INVALID_INPUT),
            (json!({ "pickup_address": "A", "dropoff_address": "B", "distance_km": 1, "duration_min": 1, "category": "luxury" }), INVALID_CATEGORY),
            (json!({ "pickup_address": "A", "dropoff_address": "B", "pickup_lat": 91, "distance_km": 1, "duration_min": 1, "category": "xl" }), INVALID_INPUT),
        ];

        let api = api();
        for (body, code) in cases {
            let err = block_on(bookings::create(Extension(api.clone()), booking_body(body.clone())))
                .unwrap_err();
            assert_eq!(err.code, code, "{}", body);
        }

        let Json(listed) = block_on(bookings::list(Extension(api))).unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn missing_addresses_message() {
        let body = booking_body(json!({ "pickup_address": "", "dropoff_address": "X" }));

        let err = block_on(bookings::create(Extension(api()), body)).unwrap_err();

        assert_eq!(err.message, "Missing addresses");
    }

    #[test]
    fn malformed_booking_bodies_get_error_envelope() {
        let api = api();

        for raw in ["", "{", "not json", "[]", "\"Main St\"", "null"] {
            let err = block_on(bookings::create(Extension(api.clone()), Bytes::from(raw)))
                .unwrap_err();
            assert_eq!(err.code, INVALID_INPUT, "{:?}", raw);
            assert_eq!(err.message, "Invalid body");

            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }

        let Json(listed) = block_on(bookings::list(Extension(api))).unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn loosely_typed_booking_fields() {
        let api = api();
        let ride = |pickup: serde_json::Value, category: serde_json::Value| {
            booking_body(json!({
                "pickup_address": pickup,
                "dropoff_address": "Airport",
                "distance_km": 10,
                "duration_min": 20,
                "category": category
            }))
        };

        let (_, Json(created)) =
            block_on(bookings::create(Extension(api.clone()), ride(json!(123), json!("economy"))))
                .unwrap();
        assert_eq!(created.pickup_address, "123");

        let err = block_on(bookings::create(Extension(api.clone()), ride(json!("A"), json!(7))))
            .unwrap_err();
        assert_eq!(err.code, INVALID_CATEGORY);

        let err = block_on(bookings::create(Extension(api.clone()), ride(json!({ "street": "A" }), json!("xl"))))
            .unwrap_err();
        assert_eq!(err.code, INVALID_INPUT);
        assert_eq!(err.message, "Invalid pickup_address");

        let Json(listed) = block_on(bookings::list(Extension(api))).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn frontend_quote_with_rounded_metrics_is_booked() {
        let body = booking_body(json!({
            "pickup_address": "Main St 1",
            "dropoff_address": "Airport",
            "distance_km": 12.35,
            "duration_min": 17.26,
            "category": "economy",
            "fare": 17.56
        }));

        let (status, Json(created)) = block_on(bookings::create(Extension(api()), body)).unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.fare, dec!(17.57));
    }

    #[test]
    fn health_reports_ok() {
        let (status, Json(body)) = block_on(health::check(Extension(api())));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[test]
    fn router_builds_with_origin() {
        assert!(router(api(), "*").is_ok());
        assert!(router(api(), "http://localhost:5173").is_ok());
        assert!(router(api(), "bad\norigin").is_err());
    }
}
