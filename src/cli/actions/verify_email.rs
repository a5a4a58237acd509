use crate::forms::{AutoVerifier, FormConfig, HttpAuthApi, OutcomeKind, QueryParams, VerifyStart};
use anyhow::{bail, Context, Result};

#[derive(Debug)]
pub struct Args {
    pub api_url: String,
    pub config: FormConfig,
    pub link: String,
}

/// Run the verify-email flow once for the code in `link`.
/// # Errors
/// Returns an error if the link is invalid, has no code, or verification fails.
pub async fn execute(args: Args) -> Result<()> {
    let params = QueryParams::from_link(&args.link)
        .with_context(|| format!("Invalid link: {}", args.link))?;
    let api = HttpAuthApi::new(args.api_url).context("Failed to build auth API client")?;
    let mut verifier = AutoVerifier::new(api, args.config, &params);

    if verifier.start().await == VerifyStart::MissingToken {
        bail!("The link has no verification code");
    }

    match verifier.presentation() {
        Some(presentation) if presentation.kind == OutcomeKind::Success => {
            println!("{}", presentation.message);
            verifier.dismiss();
            Ok(())
        }
        Some(presentation) => bail!("{}", presentation.message),
        None => bail!("Verification did not complete"),
    }
}
