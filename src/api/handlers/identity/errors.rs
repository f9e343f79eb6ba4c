//! Provider error translation.
//!
//! Client-correctable provider failures stay 4xx; only unrecognized failures
//! escalate to 500.

use crate::{
    api::handlers::Failure,
    identity::{ProviderError, ProviderErrorKind},
};
use axum::http::StatusCode;

pub const SIGNUP_FAILED: &str = "User sign-up failed";
pub const CONFIRM_FAILED: &str = "Error confirming user";
pub const LOGIN_FAILED: &str = "Login failed";

pub const USERNAME_EXISTS: &str = "User already exists. Please try signing in.";
pub const INVALID_PARAMETER: &str = "Invalid user details provided.";
pub const NOT_AUTHORIZED: &str = "You are not authorized to perform this action.";
pub const TOO_MANY_REQUESTS: &str = "Too many requests. Please try again later.";

/// Full translation table; `default_message` labels unrecognized failures.
#[must_use]
pub fn translate(error: &ProviderError, default_message: &str) -> Failure {
    let (status, message) = match error.kind {
        ProviderErrorKind::UsernameExists => (StatusCode::BAD_REQUEST, USERNAME_EXISTS),
        ProviderErrorKind::InvalidParameter => (StatusCode::BAD_REQUEST, INVALID_PARAMETER),
        ProviderErrorKind::NotAuthorized => (StatusCode::BAD_REQUEST, NOT_AUTHORIZED),
        ProviderErrorKind::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS),
        ProviderErrorKind::UserNotFound
        | ProviderErrorKind::CodeMismatch
        | ProviderErrorKind::ExpiredCode
        | ProviderErrorKind::Unrecognized => (StatusCode::INTERNAL_SERVER_ERROR, default_message),
    };

    Failure::provider(error.kind, status, message, error.message.clone())
}

#[must_use]
pub fn signup_failure(error: &ProviderError) -> Failure {
    translate(error, SIGNUP_FAILED)
}

/// Confirmation failures are client-correctable (bad or expired code), so
/// everything but rate limiting is 400 with the provider message verbatim.
#[must_use]
pub fn confirm_failure(error: &ProviderError) -> Failure {
    client_failure(error, CONFIRM_FAILED)
}

#[must_use]
pub fn signin_failure(error: &ProviderError) -> Failure {
    client_failure(error, LOGIN_FAILED)
}

fn client_failure(error: &ProviderError, message: &str) -> Failure {
    match error.kind {
        ProviderErrorKind::TooManyRequests => translate(error, message),
        kind => Failure::provider(kind, StatusCode::BAD_REQUEST, message, error.message.clone()),
    }
}
