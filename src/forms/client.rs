//! Client for the two auth API endpoints behind the account-link pages.
//! The flows only talk to [`AuthApi`]; [`HttpAuthApi`] is the production
//! implementation on top of `reqwest`.

use super::error::FormError;
use crate::APP_USER_AGENT;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::future::Future;
use tracing::{debug, instrument};

pub const DEFAULT_API_BASE_URL: &str = "https://server.thescamalicious.com";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const VERIFY_EMAIL_PATH: &str = "/auth/verify-email";

/// Maximum number of server message characters surfaced to the UI.
const MAX_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub code: String,
    #[serde(serialize_with = "serialize_secret")]
    pub new_password: SecretString,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest {
    pub code: String,
}

/// Body shared by success and failure responses.
#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// A 2xx answer from the auth API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiReply {
    pub message: Option<String>,
}

pub trait AuthApi {
    /// Sends the new password with the reset code.
    ///
    /// # Errors
    /// `FormError::Rejected` for a non-2xx status, a transport variant when
    /// no structured response could be read.
    fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> impl Future<Output = Result<ApiReply, FormError>> + Send;

    /// Confirms the email address owning the code.
    ///
    /// # Errors
    /// Same contract as [`AuthApi::reset_password`].
    fn verify_email(
        &self,
        request: &VerifyEmailRequest,
    ) -> impl Future<Output = Result<ApiReply, FormError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FormError> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl AuthApi for HttpAuthApi {
    #[instrument(skip_all, fields(path = RESET_PASSWORD_PATH))]
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<ApiReply, FormError> {
        let url = build_url_with_base(&self.base_url, RESET_PASSWORD_PATH);
        let response = self.client.post(url).json(request).send().await?;
        handle_response(response).await
    }

    #[instrument(skip_all, fields(path = VERIFY_EMAIL_PATH))]
    async fn verify_email(&self, request: &VerifyEmailRequest) -> Result<ApiReply, FormError> {
        let url = build_url_with_base(&self.base_url, VERIFY_EMAIL_PATH);
        let response = self.client.put(url).json(request).send().await?;
        handle_response(response).await
    }
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Joins the API base URL and an endpoint path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Reads `{message?}` from either outcome. A body that is not a JSON
/// object, an empty one included, is a fault whatever the status.
async fn handle_response(response: Response) -> Result<ApiReply, FormError> {
    let status = response.status();
    let body = response.text().await?;
    debug!(status = status.as_u16(), "auth API responded");

    let message = decode_message(&body)?;
    if status.is_success() {
        Ok(ApiReply { message })
    } else {
        Err(FormError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn decode_message(body: &str) -> Result<Option<String>, FormError> {
    let decoded: MessageBody = serde_json::from_str(body)
        .map_err(|err| FormError::Parse(format!("Failed to decode response: {err}")))?;

    Ok(decoded
        .message
        .filter(|message| !message.is_empty())
        .map(|message| message.chars().take(MAX_MESSAGE_CHARS).collect()))
}
