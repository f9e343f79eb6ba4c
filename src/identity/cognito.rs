use super::{IdentityProvider, IdentityToken, ProviderError, ProviderErrorKind};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};
use url::Url;

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Cognito user pool client using the public app-client actions
/// (`SignUp`, `ConfirmSignUp`, `InitiateAuth`), which need no request signing.
#[derive(Clone, Debug)]
pub struct CognitoClient {
    client: Client,
    endpoint: Url,
    client_id: String,
}

impl CognitoClient {
    #[must_use]
    pub fn new(client: Client, endpoint: Url, client_id: String) -> Self {
        Self {
            client,
            endpoint,
            client_id,
        }
    }

    /// Regional endpoint, e.g. `https://cognito-idp.us-east-1.amazonaws.com/`
    ///
    /// # Errors
    /// Returns an error if the region produces an invalid host.
    pub fn endpoint_for_region(region: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://cognito-idp.{}.amazonaws.com/", region.trim()))
    }

    /// POST one action and return the decoded JSON body, or the provider error.
    async fn call(&self, action: &str, payload: &Value) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, AMZ_JSON)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| {
                error!("Error calling identity provider {}: {}", action, e);

                ProviderError::new(ProviderErrorKind::Unrecognized, e.to_string())
            })?;

        let status = response.status();
        let header_code = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            error!("Error reading identity provider response: {}", e);

            ProviderError::new(ProviderErrorKind::Unrecognized, e.to_string())
        })?;

        if !status.is_success() {
            let error = provider_error(status.as_u16(), header_code.as_deref(), &body);

            debug!("{} rejected: {}", action, error);

            return Err(error);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Error parsing identity provider response: {}", e);

            ProviderError::new(ProviderErrorKind::Unrecognized, e.to_string())
        })
    }
}

/// Build a [`ProviderError`] out of a non-2xx response.
fn provider_error(status: u16, header_code: Option<&str>, body: &str) -> ProviderError {
    let json: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let code = json["__type"]
        .as_str()
        .or(header_code)
        .unwrap_or_default();

    let message = json["message"]
        .as_str()
        .or_else(|| json["Message"].as_str())
        .map_or_else(
            || format!("identity provider returned status {status}"),
            str::to_string,
        );

    ProviderError::new(ProviderErrorKind::from_code(code), message)
}

#[async_trait]
impl IdentityProvider for CognitoClient {
    #[instrument(skip(self, password, email))]
    async fn register(
        &self,
        username: &str,
        password: &SecretString,
        email: &str,
    ) -> Result<(), ProviderError> {
        let payload = json!({
            "ClientId": self.client_id,
            "Username": username,
            "Password": password.expose_secret(),
            "UserAttributes": [{ "Name": "email", "Value": email }],
        });

        self.call("SignUp", &payload).await.map(|_| ())
    }

    #[instrument(skip(self, code))]
    async fn confirm_registration(
        &self,
        username: &str,
        code: &str,
    ) -> Result<(), ProviderError> {
        let payload = json!({
            "ClientId": self.client_id,
            "Username": username,
            "ConfirmationCode": code,
        });

        self.call("ConfirmSignUp", &payload).await.map(|_| ())
    }

    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IdentityToken, ProviderError> {
        let payload = json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": self.client_id,
            "AuthParameters": {
                "USERNAME": username,
                "PASSWORD": password.expose_secret(),
            },
        });

        let response = self.call("InitiateAuth", &payload).await?;

        if let Some(id_token) = response["AuthenticationResult"]["IdToken"].as_str() {
            return Ok(IdentityToken::new(id_token.to_string()));
        }

        // MFA, NEW_PASSWORD_REQUIRED, etc. are not handled by this service.
        let message = response["ChallengeName"].as_str().map_or_else(
            || "authentication result missing IdToken".to_string(),
            |challenge| format!("unsupported authentication challenge: {challenge}"),
        );

        error!("{}", message);

        Err(ProviderError::new(ProviderErrorKind::Unrecognized, message))
    }
}
