use super::{
    errors::confirm_failure,
    require_provider,
    types::{ConfirmationRequest, MessageResponse},
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

pub const CONFIRM_SUCCESS: &str = "User confirmed successfully";

#[utoipa::path(
    post,
    path = "/confirm",
    request_body = ConfirmationRequest,
    responses(
        (status = 200, description = "Account confirmed", body = MessageResponse),
        (status = 400, description = "Validation error, invalid or expired code", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 429, description = "Provider rate limit", body = ErrorResponse),
        (status = 500, description = "Server misconfiguration", body = ErrorResponse)
    ),
    tag = "identity"
)]
#[instrument(skip(state, body))]
pub async fn confirm(
    state: Extension<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    match read_body(body) {
        Ok(body) => confirm_user(state.identity(), &body).await,
        Err(failure) => OperationResult::Failure(failure),
    }
}

pub async fn confirm_user(
    identity: Option<&dyn IdentityProvider>,
    body: &[u8],
) -> OperationResult<MessageResponse> {
    try_confirm_user(identity, body).await.into()
}

async fn try_confirm_user(
    identity: Option<&dyn IdentityProvider>,
    body: &[u8],
) -> Result<MessageResponse, Failure> {
    let identity = require_provider(identity)?;
    let request: ConfirmationRequest = validate(body)?;

    identity
        .confirm_registration(&request.username, &request.confirmation_code)
        .await
        .map_err(|e| {
            error!("Error confirming user {}: {}", request.username, e);

            confirm_failure(&e)
        })?;

    info!("User confirmed: {}", request.username);

    Ok(MessageResponse::new(CONFIRM_SUCCESS))
}
