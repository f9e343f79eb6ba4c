use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use url::Url;

pub const ARG_USER_POOL_CLIENT_ID: &str = "user-pool-client-id";
pub const ARG_REGION: &str = "region";
pub const ARG_IDENTITY_ENDPOINT: &str = "identity-endpoint";

const DEFAULT_REGION: &str = "us-east-1";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_USER_POOL_CLIENT_ID)
                .long(ARG_USER_POOL_CLIENT_ID)
                .help("Cognito user pool app client id")
                .long_help(
                    "Cognito user pool app client id. When absent the server still starts, but identity routes answer 500 (server misconfiguration).",
                )
                .env("STOREFRONT_USER_POOL_CLIENT_ID"),
        )
        .arg(
            Arg::new(ARG_REGION)
                .long(ARG_REGION)
                .help("AWS region of the user pool")
                .env("STOREFRONT_AWS_REGION")
                .default_value(DEFAULT_REGION),
        )
        .arg(
            Arg::new(ARG_IDENTITY_ENDPOINT)
                .long(ARG_IDENTITY_ENDPOINT)
                .help("Identity provider endpoint, overrides the regional default")
                .env("STOREFRONT_IDENTITY_ENDPOINT"),
        )
}

#[derive(Debug)]
pub struct Options {
    pub client_id: Option<String>,
    pub endpoint: Url,
}

impl Options {
    /// # Errors
    /// Returns an error if the endpoint (explicit or derived from region) is not a valid URL.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let client_id = matches
            .get_one::<String>(ARG_USER_POOL_CLIENT_ID)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let endpoint = match matches.get_one::<String>(ARG_IDENTITY_ENDPOINT) {
            Some(endpoint) => Url::parse(endpoint)
                .with_context(|| format!("invalid --{ARG_IDENTITY_ENDPOINT}: {endpoint}"))?,
            None => {
                let region = matches
                    .get_one::<String>(ARG_REGION)
                    .map_or(DEFAULT_REGION, String::as_str);
                crate::identity::CognitoClient::endpoint_for_region(region)
                    .with_context(|| format!("invalid --{ARG_REGION}: {region}"))?
            }
        };

        Ok(Self {
            client_id,
            endpoint,
        })
    }
}
