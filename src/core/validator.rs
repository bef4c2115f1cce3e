//! Raw scan → validated event.
//!
//! Checks run in a fixed order (employee id, action, timestamp, location) and the first
//! failure wins. The timestamp is normalized to the reference zone, at millisecond
//! precision, here and nowhere else.

use crate::errors::{AppResult, Field, ValidationError};
use crate::models::action::Action;
use crate::models::event::NewEvent;
use crate::models::location::GeoPoint;
use crate::models::raw_scan::RawScan;
use crate::store::{EmployeeDirectory, OpContext};
use crate::utils::time::{Timestamp, parse_instant};
use chrono::SubsecRound;
use serde_json::Value;

pub struct ScanValidator;

impl ScanValidator {
    /// Validate a raw scan against the directory.
    ///
    /// Returns `AppError::Validation` for a bad payload; a directory failure surfaces as
    /// the corresponding store error instead.
    pub fn validate<D: EmployeeDirectory + ?Sized>(
        raw: &RawScan,
        directory: &D,
        ctx: &OpContext,
    ) -> AppResult<NewEvent> {
        let employee_id = parse_employee_id(raw.employee_id.as_ref())?;

        if directory.resolve(&employee_id, ctx)?.is_none() {
            return Err(ValidationError::new(
                Field::EmployeeId,
                format!("unknown employee '{employee_id}'"),
            )
            .into());
        }

        let action = parse_action(raw.action.as_ref())?;
        let timestamp = parse_timestamp(raw.timestamp.as_ref())?;
        let location = parse_location(raw.location.as_ref())?;

        Ok(NewEvent {
            employee_id,
            action,
            timestamp,
            location,
        })
    }
}

pub fn parse_employee_id(v: Option<&Value>) -> Result<String, ValidationError> {
    let id = match v {
        None | Some(Value::Null) => {
            return Err(ValidationError::new(Field::EmployeeId, "missing"));
        }
        Some(Value::String(s)) => s.clone(),
        // Identity codes printed as bare numbers in older QR badges.
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => n.to_string(),
        Some(other) => {
            return Err(ValidationError::new(
                Field::EmployeeId,
                format!("expected a string, got {}", json_kind(other)),
            ));
        }
    };

    if id.trim().is_empty() {
        return Err(ValidationError::new(Field::EmployeeId, "empty"));
    }
    Ok(id)
}

pub fn parse_action(v: Option<&Value>) -> Result<Action, ValidationError> {
    match v {
        None | Some(Value::Null) => Err(ValidationError::new(Field::Action, "missing")),
        Some(Value::String(s)) => Action::from_token(s).ok_or_else(|| {
            ValidationError::new(
                Field::Action,
                format!("'{s}' is not one of 'entrada', 'salida'"),
            )
        }),
        Some(other) => Err(ValidationError::new(
            Field::Action,
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

pub fn parse_timestamp(v: Option<&Value>) -> Result<Timestamp, ValidationError> {
    match v {
        None | Some(Value::Null) => Err(ValidationError::new(Field::Timestamp, "missing")),
        // Stores keep millisecond precision; truncate here so every store agrees.
        Some(Value::String(s)) => parse_instant(s)
            .map(|ts| ts.trunc_subsecs(3))
            .ok_or_else(|| {
                ValidationError::new(
                    Field::Timestamp,
                    format!("'{s}' is not an absolute instant (RFC 3339 with offset expected)"),
                )
            }),
        Some(other) => Err(ValidationError::new(
            Field::Timestamp,
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

/// `null` or absent → no location. An object must carry both coordinates.
pub fn parse_location(v: Option<&Value>) -> Result<Option<GeoPoint>, ValidationError> {
    let obj = match v {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(obj)) => obj,
        Some(other) => {
            return Err(ValidationError::new(
                Field::Location,
                format!("expected an object, got {}", json_kind(other)),
            ));
        }
    };

    let coord = |key: &str| -> Result<f64, ValidationError> {
        obj.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| ValidationError::new(Field::Location, format!("{key} must be a number")))
    };

    let latitude = coord("latitude")?;
    let longitude = coord("longitude")?;

    if !GeoPoint::lat_in_range(latitude) {
        return Err(ValidationError::new(
            Field::Location,
            format!("latitude {latitude} outside [-90, 90]"),
        ));
    }
    if !GeoPoint::lon_in_range(longitude) {
        return Err(ValidationError::new(
            Field::Location,
            format!("longitude {longitude} outside [-180, 180]"),
        ));
    }

    Ok(GeoPoint::new(latitude, longitude))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
