use crate::forms::{FormConfig, HttpAuthApi};
use crate::web::{self, AppState};
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: String,
    pub config: FormConfig,
    pub sample_code: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        api_url = %args.api_url,
        require_confirmation = args.config.require_confirmation(),
        enforce_strength_policy = args.config.enforce_strength_policy(),
        redirect_on_success = args.config.redirect_on_success(),
        submit_empty_token = args.config.submit_empty_token(),
        "starting server"
    );

    let api = HttpAuthApi::new(args.api_url).context("Failed to build auth API client")?;
    let state = AppState::new(api, args.config).with_sample_code(args.sample_code);

    web::new(args.port, state).await
}
