//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{reset_password, server, verify_email, Action};
use crate::cli::commands::{
    api, forms, ARG_CONFIRM, ARG_LINK, ARG_PASSWORD, ARG_PORT, ARG_SAMPLE_CODE,
    CMD_RESET_PASSWORD, CMD_SERVER, CMD_VERIFY_EMAIL,
};
use crate::web::DEFAULT_SAMPLE_CODE;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

/// # Errors
/// Returns an error if a subcommand is missing or its arguments are inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api = api::Options::parse(matches)?;
    let config = forms::config(matches);

    match matches.subcommand() {
        Some((CMD_SERVER, sub_m)) => Ok(Action::Server(server::Args {
            port: sub_m.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
            api_url: api.url,
            config,
            sample_code: sub_m
                .get_one::<String>(ARG_SAMPLE_CODE)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SAMPLE_CODE.to_string()),
        })),
        Some((CMD_RESET_PASSWORD, sub_m)) => {
            let confirm = sub_m.get_one::<String>(ARG_CONFIRM).cloned();
            if config.require_confirmation() && confirm.is_none() {
                return Err(anyhow!(
                    "missing required argument: --{ARG_CONFIRM} (or pass --no-confirmation)"
                ));
            }

            Ok(Action::ResetPassword(reset_password::Args {
                api_url: api.url,
                config,
                link: required(sub_m, ARG_LINK)?,
                password: SecretString::from(required(sub_m, ARG_PASSWORD)?),
                confirm: confirm.map(SecretString::from),
            }))
        }
        Some((CMD_VERIFY_EMAIL, sub_m)) => Ok(Action::VerifyEmail(verify_email::Args {
            api_url: api.url,
            config,
            link: required(sub_m, ARG_LINK)?,
        })),
        _ => Err(anyhow!("missing subcommand")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn clean_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(
            [
                ("SCAMALICIOUS_API_URL", None::<&str>),
                ("SCAMALICIOUS_NO_CONFIRMATION", None::<&str>),
                ("SCAMALICIOUS_CONFIRM_PASSWORD", None::<&str>),
                ("SCAMALICIOUS_NEW_PASSWORD", None::<&str>),
                ("SCAMALICIOUS_PORT", None::<&str>),
            ],
            f,
        );
    }

    #[test]
    fn server_action_uses_defaults() {
        clean_env(|| {
            let matches = crate::cli::commands::new().get_matches_from(vec!["scamalicious", "server"]);
            match handler(&matches) {
                Ok(Action::Server(args)) => {
                    assert_eq!(args.port, 8080);
                    assert_eq!(args.api_url, crate::forms::DEFAULT_API_BASE_URL);
                    assert_eq!(args.sample_code, DEFAULT_SAMPLE_CODE);
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn reset_password_requires_confirmation() {
        clean_env(|| {
            let matches = crate::cli::commands::new().get_matches_from(vec![
                "scamalicious",
                "reset-password",
                "--link",
                "https://thescamalicious.com/forgot-password?code=223344",
                "--password",
                "Abcd1234!",
            ]);
            let result = handler(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(err
                    .to_string()
                    .contains("missing required argument: --confirm"));
            }
        });
    }

    #[test]
    fn reset_password_without_confirmation_flag() {
        clean_env(|| {
            let matches = crate::cli::commands::new().get_matches_from(vec![
                "scamalicious",
                "--no-confirmation",
                "reset-password",
                "--link",
                "https://thescamalicious.com/forgot-password?code=223344",
                "--password",
                "Abcd1234!",
            ]);
            match handler(&matches) {
                Ok(Action::ResetPassword(args)) => {
                    assert_eq!(args.password.expose_secret(), "Abcd1234!");
                    assert!(args.confirm.is_none());
                    assert!(!args.config.require_confirmation());
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        clean_env(|| {
            let matches = crate::cli::commands::new().get_matches_from(vec![
                "scamalicious",
                "--api-url",
                "not a url",
                "verify-email",
                "--link",
                "https://thescamalicious.com/verify?code=1",
            ]);
            assert!(handler(&matches).is_err());
        });
    }
}
