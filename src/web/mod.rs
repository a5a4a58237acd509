use crate::forms::{FormConfig, HttpAuthApi};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod handlers;
pub mod views;

pub const RESET_PASSWORD_PAGE: &str = "/forgot-password";
pub const VERIFY_EMAIL_PAGE: &str = "/verify";
pub const NAVIGATION_PAGE: &str = "/test";

/// Code used by the navigation page links.
pub const DEFAULT_SAMPLE_CODE: &str = "223344";

/// Shared by every request; each request builds its own flow controller.
#[derive(Clone, Debug)]
pub struct AppState {
    api: HttpAuthApi,
    config: FormConfig,
    sample_code: String,
}

impl AppState {
    #[must_use]
    pub fn new(api: HttpAuthApi, config: FormConfig) -> Self {
        Self {
            api,
            config,
            sample_code: DEFAULT_SAMPLE_CODE.to_string(),
        }
    }

    #[must_use]
    pub fn with_sample_code(mut self, sample_code: impl Into<String>) -> Self {
        self.sample_code = sample_code.into();
        self
    }

    #[must_use]
    pub fn api(&self) -> &HttpAuthApi {
        &self.api
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    #[must_use]
    pub fn sample_code(&self) -> &str {
        &self.sample_code
    }
}

#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            RESET_PASSWORD_PAGE,
            get(handlers::reset_password::show).post(handlers::reset_password::submit),
        )
        .route(VERIFY_EMAIL_PAGE, get(handlers::verify_email::verify_email))
        .route(NAVIGATION_PAGE, get(handlers::navigation::navigation))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(Arc::new(state))),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
