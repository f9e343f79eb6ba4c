use crate::catalog::DEFAULT_CATALOG_URL;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use url::Url;

pub const ARG_CATALOG_URL: &str = "catalog-url";
pub const ARG_HTTP_TIMEOUT_SECONDS: &str = "http-timeout-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_CATALOG_URL)
                .long(ARG_CATALOG_URL)
                .help("Product catalog base URL")
                .env("STOREFRONT_CATALOG_URL")
                .default_value(DEFAULT_CATALOG_URL),
        )
        .arg(
            Arg::new(ARG_HTTP_TIMEOUT_SECONDS)
                .long(ARG_HTTP_TIMEOUT_SECONDS)
                .help("Timeout for outbound identity provider and catalog requests")
                .env("STOREFRONT_HTTP_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub url: Url,
    pub http_timeout_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if the catalog URL is invalid.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_CATALOG_URL)
            .map_or(DEFAULT_CATALOG_URL, String::as_str);
        let url = Url::parse(url).with_context(|| format!("invalid --{ARG_CATALOG_URL}: {url}"))?;

        let http_timeout_seconds = matches
            .get_one::<u64>(ARG_HTTP_TIMEOUT_SECONDS)
            .copied()
            .unwrap_or(10);

        Ok(Self {
            url,
            http_timeout_seconds,
        })
    }
}
