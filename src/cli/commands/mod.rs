pub mod catalog;
pub mod identity;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("storefront")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("STOREFRONT_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = identity::with_args(command);
    let command = catalog::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: [&str; 8] = [
        "STOREFRONT_PORT",
        "STOREFRONT_USER_POOL_CLIENT_ID",
        "STOREFRONT_AWS_REGION",
        "STOREFRONT_IDENTITY_ENDPOINT",
        "STOREFRONT_CATALOG_URL",
        "STOREFRONT_HTTP_TIMEOUT_SECONDS",
        "STOREFRONT_LOG_LEVEL",
        "RUST_LOG",
    ];

    fn unset_env() -> Vec<(&'static str, Option<&'static str>)> {
        ENV_VARS.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "storefront");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_starts_without_identity_configuration() {
        temp_env::with_vars(unset_env(), || {
            let Ok(matches) = new().try_get_matches_from(vec!["storefront"]) else {
                panic!("storefront must start without a user pool client id");
            };
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert!(matches
                .get_one::<String>(identity::ARG_USER_POOL_CLIENT_ID)
                .is_none());
        });
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(unset_env(), || {
            let matches = new().get_matches_from(vec![
                "storefront",
                "--port",
                "3000",
                "--user-pool-client-id",
                "client-123",
                "--region",
                "eu-west-1",
                "--catalog-url",
                "http://localhost:9000",
            ]);

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(3000));
            assert_eq!(
                matches
                    .get_one::<String>(identity::ARG_USER_POOL_CLIENT_ID)
                    .cloned(),
                Some("client-123".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(identity::ARG_REGION).cloned(),
                Some("eu-west-1".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(catalog::ARG_CATALOG_URL).cloned(),
                Some("http://localhost:9000".to_string())
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("STOREFRONT_PORT", Some("443")),
                ("STOREFRONT_USER_POOL_CLIENT_ID", Some("client-env")),
                ("STOREFRONT_AWS_REGION", Some("ap-south-1")),
                ("STOREFRONT_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["storefront"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches
                        .get_one::<String>(identity::ARG_USER_POOL_CLIENT_ID)
                        .cloned(),
                    Some("client-env".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(identity::ARG_REGION).cloned(),
                    Some("ap-south-1".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, level) in levels.iter().enumerate() {
            temp_env::with_var("STOREFRONT_LOG_LEVEL", Some(level), || {
                let matches = new().get_matches_from(vec!["storefront"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_var("STOREFRONT_LOG_LEVEL", None::<&str>, || {
                let mut args = vec!["storefront".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_invalid_port() {
        temp_env::with_vars(unset_env(), || {
            let result = new().try_get_matches_from(vec!["storefront", "--port", "70000"]);
            assert!(result.is_err());
        });
    }
}
