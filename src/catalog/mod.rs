//! Read-only product catalog proxy.
//!
//! Product data is passed through untouched as JSON.

mod fakestore;

pub use self::fakestore::FakeStoreClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// Catalog request failure.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct UpstreamError {
    /// HTTP status returned by the catalog, `None` for transport/decode errors.
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_products(&self) -> Result<Value, UpstreamError>;

    async fn product(&self, id: &str) -> Result<Value, UpstreamError>;
}
