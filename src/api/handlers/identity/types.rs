//! Request/response types for identity endpoints.

use super::validation::{Operation, Validated};
use crate::identity::IdentityToken;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Debug)]
pub struct RegistrationRequest {
    pub username: String,
    #[schema(value_type = String)]
    pub password: SecretString,
    pub email: String,
}

impl Validated<3> for RegistrationRequest {
    const OPERATION: Operation = Operation::Register;
    const FIELDS: [&'static str; 3] = ["username", "password", "email"];

    fn from_fields([username, password, email]: [String; 3]) -> Self {
        Self {
            username,
            password: SecretString::from(password),
            email,
        }
    }
}

#[derive(ToSchema, Debug)]
#[schema(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub username: String,
    pub confirmation_code: String,
}

impl Validated<2> for ConfirmationRequest {
    const OPERATION: Operation = Operation::Confirm;
    const FIELDS: [&'static str; 2] = ["username", "confirmationCode"];

    fn from_fields([username, confirmation_code]: [String; 2]) -> Self {
        Self {
            username,
            confirmation_code,
        }
    }
}

#[derive(ToSchema, Debug)]
pub struct AuthenticationRequest {
    pub username: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

impl Validated<2> for AuthenticationRequest {
    const OPERATION: Operation = Operation::Authenticate;
    const FIELDS: [&'static str; 2] = ["username", "password"];

    fn from_fields([username, password]: [String; 2]) -> Self {
        Self {
            username,
            password: SecretString::from(password),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    #[serde(rename = "idToken")]
    pub id_token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub tokens: Tokens,
}

impl LoginResponse {
    #[must_use]
    pub fn new(message: &str, token: IdentityToken) -> Self {
        Self {
            message: message.to_string(),
            tokens: Tokens {
                id_token: token.into_inner(),
            },
        }
    }
}
