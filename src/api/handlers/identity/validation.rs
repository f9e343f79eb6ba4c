//! Request body validation for identity operations.
//!
//! Bodies are parsed by hand instead of through the `Json` extractor so that
//! missing, malformed and incomplete bodies each get their own stable message
//! regardless of the request `Content-Type`.

use crate::api::handlers::Failure;
use axum::{body::Bytes, extract::rejection::BytesRejection};
use serde_json::{Map, Value};

pub const MISSING_BODY: &str = "Invalid request: Missing request body";
pub const INVALID_JSON: &str = "Invalid JSON format in request body";
pub const UNREADABLE_BODY: &str = "Invalid request: Unable to read request body";

/// Turn a body the extractor could not buffer (too large, aborted) into a
/// failure that keeps the extractor's status.
///
/// # Errors
/// Returns the rejection as a [`Failure`].
pub fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, Failure> {
    body.map_err(|rejection| {
        Failure::rejected(rejection.status(), UNREADABLE_BODY, rejection.body_text())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Confirm,
    Authenticate,
}

impl Operation {
    /// Aggregated message naming every required field of the operation.
    #[must_use]
    pub const fn missing_fields_message(self) -> &'static str {
        match self {
            Self::Register => "Username, password, and email are required.",
            Self::Confirm => "Missing required fields: username and confirmationCode",
            Self::Authenticate => "Username and password are required.",
        }
    }
}

/// A typed request built from `N` required, non-empty string fields.
pub trait Validated<const N: usize>: Sized {
    const OPERATION: Operation;

    /// Body field names, in the order handed to [`Validated::from_fields`].
    const FIELDS: [&'static str; N];

    fn from_fields(fields: [String; N]) -> Self;
}

/// Parse `body` and build `T`, or fail with a `ValidationError`.
///
/// # Errors
/// Returns a 400 [`Failure`] when the body is missing, is not JSON, or lacks a
/// required non-empty string field.
pub fn validate<T: Validated<N>, const N: usize>(body: &[u8]) -> Result<T, Failure> {
    let fields = parse_body(body)?;

    let values = T::FIELDS.map(|name| non_empty_string(&fields, name));
    if values.iter().any(Option::is_none) {
        return Err(Failure::validation(T::OPERATION.missing_fields_message()));
    }

    Ok(T::from_fields(values.map(Option::unwrap_or_default)))
}

/// Decode the body into a field map.
///
/// A JSON value that is not an object carries no fields.
fn parse_body(body: &[u8]) -> Result<Map<String, Value>, Failure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Failure::validation(MISSING_BODY));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(Value::Null) => Err(Failure::validation(MISSING_BODY)),
        Ok(_) => Ok(Map::new()),
        Err(_) => Err(Failure::validation(INVALID_JSON)),
    }
}

fn non_empty_string(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
