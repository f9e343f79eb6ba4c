//! Identity provider boundary.
//!
//! Handlers only see [`IdentityProvider`]; the provider owns credential storage,
//! confirmation codes and the account lifecycle
//! (`Unregistered -> PendingConfirmation -> Confirmed -> SessionIssued`).

mod cognito;

pub use self::cognito::CognitoClient;

use async_trait::async_trait;
use secrecy::SecretString;
use std::fmt;
use thiserror::Error;

/// Closed set of failure categories reported by the identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    UsernameExists,
    InvalidParameter,
    NotAuthorized,
    TooManyRequests,
    UserNotFound,
    CodeMismatch,
    ExpiredCode,
    Unrecognized,
}

impl ProviderErrorKind {
    /// Map a provider error code such as `UsernameExistsException`.
    ///
    /// Codes may arrive namespaced (`com.amazonaws...#UsernameExistsException`)
    /// or with a `:` suffix carrying extra detail; both are stripped.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let code = code.rsplit('#').next().unwrap_or(code);
        let code = code.split(':').next().unwrap_or(code).trim();

        match code {
            "UsernameExistsException" => Self::UsernameExists,
            "InvalidParameterException" => Self::InvalidParameter,
            "NotAuthorizedException" => Self::NotAuthorized,
            "TooManyRequestsException" | "LimitExceededException" => Self::TooManyRequests,
            "UserNotFoundException" => Self::UserNotFound,
            "CodeMismatchException" => Self::CodeMismatch,
            "ExpiredCodeException" => Self::ExpiredCode,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsernameExists => "UsernameExists",
            Self::InvalidParameter => "InvalidParameter",
            Self::NotAuthorized => "NotAuthorized",
            Self::TooManyRequests => "TooManyRequests",
            Self::UserNotFound => "UserNotFound",
            Self::CodeMismatch => "CodeMismatch",
            Self::ExpiredCode => "ExpiredCode",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by (or while talking to) the identity provider.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    /// Raw diagnostic from the provider, safe to surface in the `error` field.
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Opaque bearer credential vended by the provider after authentication.
///
/// Forwarded to callers verbatim and never inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityToken(String);

impl IdentityToken {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityToken(***)")
    }
}

/// The three operations the core needs from the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn register(
        &self,
        username: &str,
        password: &SecretString,
        email: &str,
    ) -> Result<(), ProviderError>;

    async fn confirm_registration(&self, username: &str, code: &str)
        -> Result<(), ProviderError>;

    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IdentityToken, ProviderError>;
}
