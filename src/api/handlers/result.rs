//! Uniform handler outcome and its JSON rendering.

use crate::identity::ProviderErrorKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
///
/// `message` is stable and safe to display, `error` is the raw diagnostic.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Provider(ProviderErrorKind),
    Configuration,
    Upstream,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::Provider(_) => "ProviderError",
            Self::Configuration => "ConfigurationError",
            Self::Upstream => "UpstreamError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub status: StatusCode,
    pub message: String,
    pub error: String,
}

impl Failure {
    /// Client input was missing or malformed, always 400.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            error: FailureKind::Validation.as_str().to_string(),
        }
    }

    /// Required setup is missing, always 500.
    pub fn configuration(error: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Configuration,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server misconfiguration".to_string(),
            error: error.into(),
        }
    }

    pub fn provider(
        kind: ProviderErrorKind,
        status: StatusCode,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            kind: FailureKind::Provider(kind),
            status,
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn upstream(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Upstream,
            status,
            message: message.into(),
            error: error.into(),
        }
    }

    /// The request was refused by an extractor before reaching the handler.
    pub fn rejected(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            status,
            message: message.into(),
            error: error.into(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = ErrorResponse {
            message: self.message,
            error: self.error,
        };
        (status, Json(body)).into_response()
    }
}

/// What every handler produces before it is serialized to a response.
#[derive(Debug)]
pub enum OperationResult<T> {
    Success(T),
    Failure(Failure),
}

impl<T> OperationResult<T> {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success(_) => StatusCode::OK,
            Self::Failure(failure) => failure.status,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl<T> From<Result<T, Failure>> for OperationResult<T> {
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(failure) => Self::Failure(failure),
        }
    }
}

impl<T: Serialize> IntoResponse for OperationResult<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(payload) => (StatusCode::OK, Json(payload)).into_response(),
            Self::Failure(failure) => failure.into_response(),
        }
    }
}
