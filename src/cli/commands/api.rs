use crate::forms::DEFAULT_API_BASE_URL;
use anyhow::{Context, Result};
use clap::{Arg, Command};
use url::Url;

pub const ARG_API_URL: &str = "api-url";

#[derive(Debug)]
pub struct Options {
    pub url: String,
}

impl Options {
    /// # Errors
    /// Returns an error if the API URL is missing or not an absolute URL.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .context("missing required argument: --api-url")?;

        Url::parse(&url).with_context(|| format!("Invalid API base URL: {url}"))?;

        Ok(Self { url })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_API_URL)
            .long(ARG_API_URL)
            .help("Base URL of the auth API, example: https://server.thescamalicious.com")
            .env("SCAMALICIOUS_API_URL")
            .global(true)
            .default_value(DEFAULT_API_BASE_URL),
    )
}
