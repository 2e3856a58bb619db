use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

pub const CONFIG_ERROR: i32 = 1;
pub const STORAGE_ERROR: i32 = 2;
pub const UNEXPECTED_ERROR: i32 = 5;
pub const INVALID_CATEGORY: i32 = 101;
pub const MISSING_FIELD: i32 = 102;
pub const INVALID_INPUT: i32 = 103;
pub const FARE_MISMATCH: i32 = 104;

/// Codes below 100 are failures on our side, everything from 100 up is
/// something the caller sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_client_error(&self) -> bool {
        self.code >= 100
    }

    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        storage_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code,
            "error": self.message,
        }));

        (self.status(), body).into_response()
    }
}

pub fn invalid_category_error() -> Error {
    Error {
        code: INVALID_CATEGORY,
        message: "Invalid category".into(),
    }
}

pub fn missing_addresses_error() -> Error {
    Error {
        code: MISSING_FIELD,
        message: "Missing addresses".into(),
    }
}

pub fn missing_field_error(field: &str) -> Error {
    Error {
        code: MISSING_FIELD,
        message: format!("Missing {}", field),
    }
}

pub fn invalid_input_error(field: &str) -> Error {
    Error {
        code: INVALID_INPUT,
        message: format!("Invalid {}", field),
    }
}

pub fn fare_mismatch_error() -> Error {
    Error {
        code: FARE_MISMATCH,
        message: "Fare does not match category and route".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: CONFIG_ERROR,
        message: "environment variable error".into(),
    }
}

pub fn config_error(message: impl Into<String>) -> Error {
    Error {
        code: CONFIG_ERROR,
        message: message.into(),
    }
}

pub fn storage_error<T: Display>(err: T) -> Error {
    tracing::error!("storage failure: {}", err);

    Error {
        code: STORAGE_ERROR,
        message: err.to_string(),
    }
}

pub fn unexpected_error<T: Debug>(err: T) -> Error {
    Error {
        code: UNEXPECTED_ERROR,
        message: format!("unexpected error: {:?}", err),
    }
}

#[test]
fn client_errors_map_to_bad_request() {
    assert_eq!(invalid_category_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(missing_addresses_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(invalid_input_error("fare").status(), StatusCode::BAD_REQUEST);
    assert_eq!(fare_mismatch_error().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn server_errors_map_to_internal_error() {
    let err = storage_error("connection refused");

    assert_eq!(err.code, STORAGE_ERROR);
    assert_eq!(err.message, "connection refused");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
