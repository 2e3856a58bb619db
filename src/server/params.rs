//! Coercion of loosely typed request values. Anything that is not a finite,
//! non-negative number is rejected here instead of being stored.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::entities::RouteMetrics;
use crate::error::{invalid_input_error, Error};

pub const LATITUDE_LIMIT: f64 = 90.0;
pub const LONGITUDE_LIMIT: f64 = 180.0;

pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, Error> {
    let raw = raw.trim();
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| invalid_input_error(field))?;

    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if value.is_sign_negative() {
        return Err(invalid_input_error(field));
    }

    Ok(value)
}

/// Query-string amount, blank or absent meaning zero.
pub fn query_amount(field: &str, raw: Option<&str>) -> Result<Decimal, Error> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_amount(field, raw),
        None => Ok(Decimal::ZERO),
    }
}

pub fn query_metrics(distance_km: Option<&str>, duration_min: Option<&str>) -> Result<RouteMetrics, Error> {
    Ok(RouteMetrics::new(
        query_amount("distanceKm", distance_km)?,
        query_amount("durationMin", duration_min)?,
    ))
}

/// JSON amount given as a number or a numeric string. `null` and absent
/// are both `None`.
pub fn json_amount(field: &str, value: Option<&Value>) -> Result<Option<Decimal>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => parse_amount(field, &number.to_string()).map(Some),
        Some(Value::String(raw)) => parse_amount(field, raw).map(Some),
        Some(_) => Err(invalid_input_error(field)),
    }
}

/// Free text given as a string or a number. Numbers keep their JSON
/// spelling; `null` and absent are both `None`.
pub fn json_text(field: &str, value: Option<&Value>) -> Result<Option<String>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(_) => Err(invalid_input_error(field)),
    }
}

/// Coordinate in `[-limit, limit]`, absent or `null` when geocoding failed.
pub fn json_coordinate(field: &str, value: Option<&Value>, limit: f64) -> Result<Option<f64>, Error> {
    let coordinate = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match coordinate {
        Some(c) if c.is_finite() && c.abs() <= limit => Ok(Some(c)),
        _ => Err(invalid_input_error(field)),
    }
}
