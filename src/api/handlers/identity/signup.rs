use super::{
    errors::signup_failure,
    require_provider,
    types::{MessageResponse, RegistrationRequest},
    validation::{read_body, validate},
};
use crate::{
    api::{
        handlers::{ErrorResponse, Failure, OperationResult},
        AppState,
    },
    identity::IdentityProvider,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const SIGNUP_SUCCESS: &str =
    "User signed up successfully. Please check email for verification code.";

#[utoipa::path(
    post,
    path = "/signup",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Account created, pending confirmation", body = MessageResponse),
        (status = 400, description = "Validation error or rejected user details", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 429, description = "Provider rate limit", body = ErrorResponse),
        (status = 500, description = "Server misconfiguration or unexpected provider failure", body = ErrorResponse)
    ),
    tag = "identity"
)]
#[instrument(skip(state, body))]
pub async fn signup(
    state: Extension<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    match read_body(body) {
        Ok(body) => register_user(state.identity(), &body).await,
        Err(failure) => OperationResult::Failure(failure),
    }
}

/// Register a new account. Not idempotent: a repeated username is rejected by
/// the provider and surfaces as 400.
pub async fn register_user(
    identity: Option<&dyn IdentityProvider>,
    body: &[u8],
) -> OperationResult<MessageResponse> {
    try_register_user(identity, body).await.into()
}

async fn try_register_user(
    identity: Option<&dyn IdentityProvider>,
    body: &[u8],
) -> Result<MessageResponse, Failure> {
    let identity = require_provider(identity)?;
    let request: RegistrationRequest = validate(body)?;

    info!("Attempting sign-up for user: {}", request.username);

    identity
        .register(&request.username, &request.password, &request.email)
        .await
        .map_err(|e| {
            error!("Sign-up failed for user {}: {}", request.username, e);

            signup_failure(&e)
        })?;

    info!("User signed up successfully: {}", request.username);

    Ok(MessageResponse::new(SIGNUP_SUCCESS))
}
