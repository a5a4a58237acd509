use crate::forms::{config::DEFAULT_LOGIN_URL, FormConfig};
use clap::{Arg, ArgAction, Command};

pub const ARG_NO_CONFIRMATION: &str = "no-confirmation";
pub const ARG_NO_STRENGTH_POLICY: &str = "no-strength-policy";
pub const ARG_REDIRECT_ON_SUCCESS: &str = "redirect-on-success";
pub const ARG_LOGIN_URL: &str = "login-url";
pub const ARG_SUBMIT_EMPTY_TOKEN: &str = "submit-empty-token";

/// Build the flow configuration from the page switches.
#[must_use]
pub fn config(matches: &clap::ArgMatches) -> FormConfig {
    let login_url = matches
        .get_one::<String>(ARG_LOGIN_URL)
        .cloned()
        .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());

    FormConfig::new()
        .with_require_confirmation(!matches.get_flag(ARG_NO_CONFIRMATION))
        .with_enforce_strength_policy(!matches.get_flag(ARG_NO_STRENGTH_POLICY))
        .with_redirect_on_success(matches.get_flag(ARG_REDIRECT_ON_SUCCESS))
        .with_login_url(login_url)
        .with_submit_empty_token(matches.get_flag(ARG_SUBMIT_EMPTY_TOKEN))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_NO_CONFIRMATION)
                .long(ARG_NO_CONFIRMATION)
                .help("Do not ask for the new password twice")
                .env("SCAMALICIOUS_NO_CONFIRMATION")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_NO_STRENGTH_POLICY)
                .long(ARG_NO_STRENGTH_POLICY)
                .help("Only reject empty passwords, skip the length and character checks")
                .env("SCAMALICIOUS_NO_STRENGTH_POLICY")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_REDIRECT_ON_SUCCESS)
                .long(ARG_REDIRECT_ON_SUCCESS)
                .help("Send the user to the login page when a successful reset is dismissed")
                .env("SCAMALICIOUS_REDIRECT_ON_SUCCESS")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_LOGIN_URL)
                .long(ARG_LOGIN_URL)
                .help("Login destination used by --redirect-on-success")
                .env("SCAMALICIOUS_LOGIN_URL")
                .global(true)
                .default_value(DEFAULT_LOGIN_URL),
        )
        .arg(
            Arg::new(ARG_SUBMIT_EMPTY_TOKEN)
                .long(ARG_SUBMIT_EMPTY_TOKEN)
                .help("Send verify-email requests even when the link has no code")
                .env("SCAMALICIOUS_SUBMIT_EMPTY_TOKEN")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}
