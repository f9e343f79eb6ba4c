#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use storefront::{
    api::{self, AppState},
    catalog::{CatalogClient, FakeStoreClient, UpstreamError},
    identity::{CognitoClient, IdentityProvider, IdentityToken, ProviderError, ProviderErrorKind},
};
use tower::ServiceExt;

#[derive(Default)]
struct MemoryProvider {
    // username -> (password, confirmed)
    accounts: Mutex<HashMap<String, (String, bool)>>,
}

#[async_trait]
impl IdentityProvider for MemoryProvider {
    async fn register(
        &self,
        username: &str,
        password: &SecretString,
        _email: &str,
    ) -> Result<(), ProviderError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(username) {
            return Err(ProviderError::new(
                ProviderErrorKind::UsernameExists,
                "User already exists",
            ));
        }
        accounts.insert(
            username.to_string(),
            (password.expose_secret().to_string(), false),
        );
        Ok(())
    }

    async fn confirm_registration(&self, username: &str, code: &str) -> Result<(), ProviderError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(username) {
            Some(account) if code == "123456" => {
                account.1 = true;
                Ok(())
            }
            Some(_) => Err(ProviderError::new(
                ProviderErrorKind::CodeMismatch,
                "Invalid verification code provided, please try again.",
            )),
            None => Err(ProviderError::new(
                ProviderErrorKind::UserNotFound,
                "Username/client id combination not found.",
            )),
        }
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IdentityToken, ProviderError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(username) {
            Some((stored, true)) if stored == password.expose_secret() => {
                Ok(IdentityToken::new(format!("token-{username}")))
            }
            _ => Err(ProviderError::new(
                ProviderErrorKind::NotAuthorized,
                "Incorrect username or password.",
            )),
        }
    }
}

struct StaticCatalog;

#[async_trait]
impl CatalogClient for StaticCatalog {
    async fn list_products(&self) -> Result<Value, UpstreamError> {
        Ok(json!([{"id": 1, "title": "Backpack"}, {"id": 2, "title": "Shirt"}]))
    }

    async fn product(&self, id: &str) -> Result<Value, UpstreamError> {
        match id {
            "1" => Ok(json!({"id": 1, "title": "Backpack"})),
            "503" => Err(UpstreamError::new(Some(503), "catalog down")),
            _ => Err(UpstreamError::new(Some(404), "not found")),
        }
    }
}

struct Harness {
    router: Router,
}

impl Harness {
    fn new(identity: Option<Arc<dyn IdentityProvider>>) -> Self {
        let state = AppState::new(identity, Arc::new(StaticCatalog));
        Self {
            router: api::app(state),
        }
    }

    fn configured() -> Self {
        Self::new(Some(Arc::new(MemoryProvider::default())))
    }

    async fn send(&self, request: Request<Body>) -> Result<(StatusCode, header::HeaderMap, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)?
        };
        Ok((status, headers, body))
    }

    async fn post(&self, path: &str, body: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;
        let (status, _, body) = self.send(request).await?;
        Ok((status, body))
    }

    async fn get(&self, path: &str) -> Result<(StatusCode, header::HeaderMap, Value)> {
        let request = Request::builder().uri(path).body(Body::empty())?;
        self.send(request).await
    }
}

#[tokio::test]
async fn lifecycle_signup_confirm_signin() -> Result<()> {
    let app = Harness::configured();

    let (status, body) = app
        .post(
            "/signup",
            r#"{"username":"u1","password":"Secret#1","email":"u1@example.com"}"#,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "User signed up successfully. Please check email for verification code."
    );

    let (status, body) = app
        .post(
            "/signup",
            r#"{"username":"u1","password":"Secret#1","email":"u1@example.com"}"#,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists. Please try signing in.");

    let (status, body) = app
        .post("/confirm", r#"{"username":"u1","confirmationCode":"123456"}"#)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User confirmed successfully");

    let (status, body) = app
        .post("/signin", r#"{"username":"u1","password":"Secret#1"}"#)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["tokens"], json!({"idToken": "token-u1"}));
    Ok(())
}

#[tokio::test]
async fn signin_with_wrong_password_is_bad_request() -> Result<()> {
    let app = Harness::configured();

    let (status, body) = app
        .post("/signin", r#"{"username":"ghost","password":"nope"}"#)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Login failed");
    assert_eq!(body["error"], "Incorrect username or password.");
    Ok(())
}

#[tokio::test]
async fn malformed_and_missing_bodies() -> Result<()> {
    let app = Harness::configured();

    for path in ["/signup", "/confirm", "/signin"] {
        let (status, body) = app.post(path, "{not json").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["message"], "Invalid JSON format in request body");

        let (status, body) = app.post(path, "").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["message"], "Invalid request: Missing request body");
    }

    let (status, body) = app.post("/signup", r#"{"username":"u1"}"#).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username, password, and email are required.");
    Ok(())
}

#[tokio::test]
async fn missing_configuration_is_internal_error() -> Result<()> {
    let app = Harness::new(None);

    for path in ["/signup", "/confirm", "/signin"] {
        let (status, body) = app.post(path, "{not json").await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(body["message"], "Server misconfiguration");
    }
    Ok(())
}

#[tokio::test]
async fn products_are_wrapped_and_cached() -> Result<()> {
    let app = Harness::configured();

    let (status, headers, body) = app.get("/products").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("public, max-age=300")
    );
    assert_eq!(body["products"].as_array().map(Vec::len), Some(2));

    let (status, headers, body) = app.get("/products/1").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key(header::CACHE_CONTROL));
    assert_eq!(body["product"]["title"], "Backpack");
    Ok(())
}

#[tokio::test]
async fn product_errors() -> Result<()> {
    let app = Harness::configured();

    let (status, headers, body) = app.get("/products/").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!headers.contains_key(header::CACHE_CONTROL));
    assert_eq!(body["message"], "Missing product ID in request");

    let (status, _, body) = app.get("/products/999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to fetch product");

    let (status, _, body) = app.get("/products/503").await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "catalog down");
    Ok(())
}

#[tokio::test]
async fn request_id_is_generated_and_propagated() -> Result<()> {
    let app = Harness::configured();

    let (_, headers, _) = app.get("/health").await?;
    let generated = headers.get("x-request-id").and_then(|v| v.to_str().ok());
    assert!(generated.is_some_and(|id| id.len() == 26));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())?;
    let (status, headers, body) = app.send(request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
    assert_eq!(body["identity_provider"], "configured");
    Ok(())
}

#[tokio::test]
async fn signup_through_cognito_and_catalog_clients() -> Result<()> {
    let mut cognito = mockito::Server::new_async().await;
    let mut catalog = mockito::Server::new_async().await;

    let signup = cognito
        .mock("POST", "/")
        .match_header("x-amz-target", "AWSCognitoIdentityProviderService.SignUp")
        .with_status(400)
        .with_header("content-type", "application/x-amz-json-1.1")
        .with_body(r#"{"__type":"UsernameExistsException","message":"User already exists"}"#)
        .create_async()
        .await;

    let products = catalog
        .mock("GET", "/products/7")
        .with_status(404)
        .create_async()
        .await;

    let client = reqwest::Client::new();
    let identity = CognitoClient::new(
        client.clone(),
        url::Url::parse(&cognito.url())?,
        "client-id".to_string(),
    );
    let catalog_client = FakeStoreClient::new(client, url::Url::parse(&catalog.url())?);
    let app = api::app(AppState::new(
        Some(Arc::new(identity)),
        Arc::new(catalog_client),
    ));
    let app = Harness { router: app };

    let (status, body) = app
        .post(
            "/signup",
            r#"{"username":"u1","password":"Secret#1","email":"u1@example.com"}"#,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists. Please try signing in.");
    assert_eq!(body["error"], "User already exists");

    let (status, _, body) = app.get("/products/7").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to fetch product");

    signup.assert_async().await;
    products.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn oversized_body_is_json_error() -> Result<()> {
    let app = Harness::configured();
    let oversized = "a".repeat(3 * 1024 * 1024);

    for path in ["/signup", "/confirm", "/signin"] {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(oversized.clone()))?;
        let (status, headers, body) = app.send(request).await?;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{path}");
        assert_eq!(
            headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(body["message"], "Invalid request: Unable to read request body");
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
    Ok(())
}

#[tokio::test]
async fn undecodable_product_id_is_json_error() -> Result<()> {
    let app = Harness::configured();

    let (status, headers, body) = app.get("/products/%FF").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert!(!headers.contains_key(header::CACHE_CONTROL));
    assert_eq!(body["message"], "Invalid product ID in request");
    assert!(body["error"].as_str().is_some_and(|e| e.contains("UTF-8")));
    Ok(())
}
