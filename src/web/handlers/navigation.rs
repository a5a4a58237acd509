use super::page_href;
use crate::web::{views, AppState, RESET_PASSWORD_PAGE, VERIFY_EMAIL_PAGE};
use axum::extract::Extension;
use maud::Markup;
use std::sync::Arc;

/// Test page linking to both flows with the configured sample code.
pub async fn navigation(Extension(state): Extension<Arc<AppState>>) -> Markup {
    views::navigation(
        &page_href(VERIFY_EMAIL_PAGE, state.sample_code()),
        &page_href(RESET_PASSWORD_PAGE, state.sample_code()),
    )
}
