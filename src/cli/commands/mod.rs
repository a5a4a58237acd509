pub mod api;
pub mod forms;
pub mod logging;

use crate::web::DEFAULT_SAMPLE_CODE;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_SERVER: &str = "server";
pub const CMD_RESET_PASSWORD: &str = "reset-password";
pub const CMD_VERIFY_EMAIL: &str = "verify-email";

pub const ARG_PORT: &str = "port";
pub const ARG_SAMPLE_CODE: &str = "sample-code";
pub const ARG_LINK: &str = "link";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM: &str = "confirm";

fn server_command() -> Command {
    Command::new(CMD_SERVER)
        .about("Serve the reset-password, verify-email and test pages")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("SCAMALICIOUS_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_SAMPLE_CODE)
                .long(ARG_SAMPLE_CODE)
                .help("Code used by the links on the /test page")
                .env("SCAMALICIOUS_SAMPLE_CODE")
                .default_value(DEFAULT_SAMPLE_CODE),
        )
}

fn link_arg() -> Arg {
    Arg::new(ARG_LINK)
        .short('l')
        .long(ARG_LINK)
        .help("Link from the email, example: https://thescamalicious.com/verify?code=223344")
        .required(true)
}

fn reset_password_command() -> Command {
    Command::new(CMD_RESET_PASSWORD)
        .about("Reset a password using the code from a reset link")
        .arg(link_arg())
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("New password")
                .env("SCAMALICIOUS_NEW_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_CONFIRM)
                .long(ARG_CONFIRM)
                .help("New password again, required unless --no-confirmation is set")
                .env("SCAMALICIOUS_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
}

fn verify_email_command() -> Command {
    Command::new(CMD_VERIFY_EMAIL)
        .about("Verify an email address using the code from a verification link")
        .arg(link_arg())
}

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

    let command = Command::new("scamalicious")
        .about("Password reset and email verification pages")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(server_command())
        .subcommand(reset_password_command())
        .subcommand(verify_email_command());

    let command = api::with_args(command);
    let command = forms::with_args(command);
    logging::with_args(command)
}
