use crate::forms::{AutoVerifier, QueryParams, VerifyStart};
use crate::web::{views, AppState};
use axum::extract::{Extension, RawQuery};
use maud::Markup;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Verifies the code from the link while rendering; the result dialog is
/// part of the first response.
#[instrument(skip_all)]
pub async fn verify_email(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Markup {
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());
    let mut verifier = AutoVerifier::new(state.api().clone(), state.config().clone(), &params);

    let started = verifier.start().await;
    debug!(?started, "verify-email page rendered");

    let presentation = verifier.presentation();
    views::verify_email(presentation.as_ref(), started == VerifyStart::MissingToken)
}
