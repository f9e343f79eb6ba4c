use super::{CatalogClient, UpstreamError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, instrument};
use url::Url;

#[derive(Clone, Debug)]
pub struct FakeStoreClient {
    client: Client,
    base_url: Url,
}

impl FakeStoreClient {
    #[must_use]
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn products_url(&self, id: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| UpstreamError::new(None, "catalog URL cannot be a base"))?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, UpstreamError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Error calling catalog: {}", e);

            UpstreamError::new(None, e.to_string())
        })?;

        let response = response.error_for_status().map_err(|e| {
            let status = e.status().map(|s| s.as_u16());

            error!("Catalog returned error status: {:?}", status);

            UpstreamError::new(status, e.to_string())
        })?;

        response.json::<Value>().await.map_err(|e| {
            error!("Error decoding catalog response: {}", e);

            UpstreamError::new(None, e.to_string())
        })
    }
}

#[async_trait]
impl CatalogClient for FakeStoreClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Value, UpstreamError> {
        info!("Fetching product data from catalog");

        let products = self.get_json(self.products_url(None)?).await?;

        info!("Successfully fetched product data");

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn product(&self, id: &str) -> Result<Value, UpstreamError> {
        info!("Fetching product details for ID: {}", id);

        self.get_json(self.products_url(Some(id))?).await
    }
}
