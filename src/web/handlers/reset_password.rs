use super::page_href;
use crate::forms::{CredentialForm, FormError, HttpAuthApi, QueryParams};
use crate::web::{views, AppState, RESET_PASSWORD_PAGE};
use axum::{
    extract::{Extension, RawQuery},
    http::StatusCode,
    response::IntoResponse,
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, instrument};

/// Fields posted by the reset form. The code stays in the query string.
#[derive(Deserialize, Default)]
pub struct ResetPasswordForm {
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

fn credential_form(
    state: &AppState,
    query: Option<String>,
) -> (CredentialForm<HttpAuthApi>, String) {
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());
    let form = CredentialForm::new(state.api().clone(), state.config().clone(), &params);
    let action = page_href(RESET_PASSWORD_PAGE, form.token().as_str());
    (form, action)
}

pub async fn show(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let (form, action) = credential_form(&state, query);
    views::reset_password(&form, &action)
}

#[instrument(skip_all)]
pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
    Form(payload): Form<ResetPasswordForm>,
) -> impl IntoResponse {
    let (mut form, action) = credential_form(&state, query);
    form.set_password(payload.password);
    form.set_confirm_password(payload.confirm_password);

    let status = match form.submit().await {
        Ok(_) => StatusCode::OK,
        Err(FormError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(err) => {
            error!("reset-password submission not attempted: {err}");
            StatusCode::CONFLICT
        }
    };

    (status, views::reset_password(&form, &action))
}
