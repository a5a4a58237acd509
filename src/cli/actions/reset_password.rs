use crate::forms::{CredentialForm, FormConfig, FormError, HttpAuthApi, QueryParams};
use anyhow::{anyhow, bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub api_url: String,
    pub config: FormConfig,
    pub link: String,
    pub password: SecretString,
    pub confirm: Option<SecretString>,
}

/// Run the reset-password flow once for the code in `link`.
/// # Errors
/// Returns an error if the link is invalid, the password is rejected locally,
/// or the server does not accept the reset.
pub async fn execute(args: Args) -> Result<()> {
    let params = QueryParams::from_link(&args.link)
        .with_context(|| format!("Invalid link: {}", args.link))?;
    let api = HttpAuthApi::new(args.api_url).context("Failed to build auth API client")?;
    let mut form = CredentialForm::new(api, args.config, &params).with_navigator(Arc::new(
        |destination: &str| println!("Continue at {destination}"),
    ));

    form.set_password(args.password.expose_secret());
    if let Some(confirm) = &args.confirm {
        form.set_confirm_password(confirm.expose_secret());
    }

    let outcome = match form.submit().await {
        Ok(outcome) => outcome,
        Err(FormError::Validation(errors)) => {
            let details = errors
                .iter()
                .map(|(field, message)| format!("{}: {message}", field.as_str()))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(anyhow!("{details}"));
        }
        Err(err) => return Err(err.into()),
    };

    if !outcome.is_success() {
        bail!("{}", outcome.message);
    }

    println!("{}", outcome.message);
    form.dismiss();

    Ok(())
}
