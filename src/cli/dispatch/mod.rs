use crate::cli::{
    actions::{server::Args, Action},
    commands::{catalog, identity, ARG_PORT},
};
use anyhow::Result;

/// # Errors
/// Returns an error if an endpoint or catalog URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let identity = identity::Options::parse(matches)?;
    let catalog = catalog::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        client_id: identity.client_id,
        identity_endpoint: identity.endpoint,
        catalog_url: catalog.url,
        http_timeout_seconds: catalog.http_timeout_seconds,
    }))
}
