use super::{
    errors::signin_failure,
    require_provider,
    types::{AuthenticationRequest, LoginResponse},
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

pub const LOGIN_SUCCESS: &str = "Login successful";

#[utoipa::path(
    post,
    path = "/signin",
    request_body = AuthenticationRequest,
    responses(
        (status = 200, description = "Authenticated, returns the provider id token", body = LoginResponse),
        (status = 400, description = "Validation error or rejected credentials", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 429, description = "Provider rate limit", body = ErrorResponse),
        (status = 500, description = "Server misconfiguration", body = ErrorResponse)
    ),
    tag = "identity"
)]
#[instrument(skip(state, body))]
pub async fn signin(
    state: Extension<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    match read_body(body) {
        Ok(body) => authenticate_user(state.identity(), &body).await,
        Err(failure) => OperationResult::Failure(failure),
    }
}

/// Authenticate and forward only the id token; other provider tokens are dropped.
pub async fn authenticate_user(
    identity: Option<&dyn IdentityProvider>,
    body: &[u8],
) -> OperationResult<LoginResponse> {
    try_authenticate_user(identity, body).await.into()
}

async fn try_authenticate_user(
    identity: Option<&dyn IdentityProvider>,
    body: &[u8],
) -> Result<LoginResponse, Failure> {
    let identity = require_provider(identity)?;
    let request: AuthenticationRequest = validate(body)?;

    info!("Attempting login for user: {}", request.username);

    let token = identity
        .authenticate(&request.username, &request.password)
        .await
        .map_err(|e| {
            error!("Authentication failed for user {}: {}", request.username, e);

            signin_failure(&e)
        })?;

    info!("Login successful for user: {}", request.username);

    Ok(LoginResponse::new(LOGIN_SUCCESS, token))
}
