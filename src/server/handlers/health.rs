use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::server::DynAPI;

pub async fn check(Extension(api): Extension<DynAPI>) -> (StatusCode, Json<Value>) {
    match api.health().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "error": err.message })),
        ),
    }
}
