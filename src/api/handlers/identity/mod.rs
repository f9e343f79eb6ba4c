//! Identity lifecycle endpoints: `/signup`, `/confirm` and `/signin`.
//!
//! Each handler runs the same pipeline: configuration check, body validation,
//! one provider call, then either a success payload or a translated failure.

pub mod confirm;
pub mod errors;
pub mod signin;
pub mod signup;
pub mod types;
pub mod validation;


use crate::{api::handlers::Failure, identity::IdentityProvider};

/// Reject the request before validation when no provider is configured.
pub(crate) fn require_provider(
    identity: Option<&dyn IdentityProvider>,
) -> Result<&dyn IdentityProvider, Failure> {
    identity.ok_or_else(|| {
        tracing::error!("Identity provider client id is not configured");

        Failure::configuration("USER_POOL_CLIENT_ID is not configured")
    })
}
