use crate::{
    api::{self, AppState},
    catalog::{CatalogClient, FakeStoreClient},
    identity::{CognitoClient, IdentityProvider},
    APP_USER_AGENT,
};
use anyhow::{Context, Result};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub client_id: Option<String>,
    pub identity_endpoint: Url,
    pub catalog_url: Url,
    pub http_timeout_seconds: u64,
}

/// Build the outbound clients and serve the API until shutdown.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let client = Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(Duration::from_secs(args.http_timeout_seconds))
        .build()
        .context("Failed to build HTTP client")?;

    let state = app_state(client, args.client_id, args.identity_endpoint, args.catalog_url);

    api::new(args.port, state).await
}

fn app_state(
    client: Client,
    client_id: Option<String>,
    identity_endpoint: Url,
    catalog_url: Url,
) -> AppState {
    let identity: Option<Arc<dyn IdentityProvider>> = match client_id {
        Some(client_id) => Some(Arc::new(CognitoClient::new(
            client.clone(),
            identity_endpoint,
            client_id,
        ))),
        None => {
            warn!("No user pool client id configured, identity routes will answer 500");
            None
        }
    };

    let catalog: Arc<dyn CatalogClient> = Arc::new(FakeStoreClient::new(client, catalog_url));

    AppState::new(identity, catalog)
}

fn log_startup_args(args: &Args) {
    info!(
        port = args.port,
        identity_endpoint = %args.identity_endpoint,
        identity_configured = args.client_id.is_some(),
        catalog_url = %args.catalog_url,
        http_timeout_seconds = args.http_timeout_seconds,
        "Starting storefront"
    );
}
