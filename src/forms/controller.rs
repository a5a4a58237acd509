//! Submission state machine shared by the reset-password and verify-email
//! pages.
//!
//! ```text
//! Idle --submit/start--> Submitting --settle--> Resolved(success|failure)
//!   ^                                                   |
//!   +--------------------- dismiss ---------------------+
//! ```
//!
//! Exactly one request is issued per attempt. The loading flag is held for
//! the whole request and released on every exit path. There is no retry:
//! the credential form can be submitted again after dismissal, the
//! auto-verifier fires once per page instance.

use super::client::{ApiReply, AuthApi, ResetPasswordRequest, VerifyEmailRequest};
use super::config::FormConfig;
use super::error::FormError;
use super::loading::LoadingFlag;
use super::outcome::{
    DefaultMessages, Outcome, Presentation, SubmissionOutcome, RESET_PASSWORD_MESSAGES,
    VERIFY_EMAIL_MESSAGES,
};
use super::token::{QueryParams, Token};
use super::validator::{self, CredentialInput, ValidationErrors};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Called with the login destination when a successful result is dismissed
/// and redirects are enabled.
pub type Navigator = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Submitting,
    Resolved(Outcome),
}

impl ControllerState {
    /// `None` while idle, `Pending` while the request is in flight.
    #[must_use]
    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        match self {
            Self::Idle => None,
            Self::Submitting => Some(SubmissionOutcome::Pending),
            Self::Resolved(outcome) => Some(SubmissionOutcome::from(outcome)),
        }
    }
}

/// Maps the API result onto a presented outcome, logging faults.
fn resolve(result: Result<ApiReply, FormError>, messages: DefaultMessages) -> Outcome {
    match result {
        Ok(reply) => Outcome::success(reply.message.unwrap_or_else(|| messages.success.to_string())),
        Err(FormError::Rejected { status, message }) => {
            warn!(status, "auth API rejected the request");
            Outcome::failure(message.unwrap_or_else(|| messages.rejected.to_string()))
        }
        Err(err) => {
            error!("auth API request failed: {err}");
            Outcome::failure(messages.fault)
        }
    }
}

/// Shared dismissal: back to `Idle`, navigating after a redirecting success.
fn dismiss_state(
    state: &mut ControllerState,
    redirect: Option<&str>,
    navigator: Option<&Navigator>,
) -> Option<String> {
    let ControllerState::Resolved(outcome) = state else {
        return None;
    };
    let destination = Presentation::new(outcome, redirect).navigate_to;
    *state = ControllerState::Idle;

    let destination = destination?;
    if let Some(navigate) = navigator {
        debug!(%destination, "navigating after dismissal");
        navigate(&destination);
    }
    Some(destination)
}

/// Reset-password page: validated, user-triggered submission.
pub struct CredentialForm<A> {
    api: A,
    config: FormConfig,
    token: Token,
    input: CredentialInput,
    errors: ValidationErrors,
    state: ControllerState,
    loading: LoadingFlag,
    navigator: Option<Navigator>,
}

impl<A: AuthApi> CredentialForm<A> {
    /// Reads the code from `params` once; it is never re-read.
    #[must_use]
    pub fn new(api: A, config: FormConfig, params: &QueryParams) -> Self {
        Self {
            api,
            config,
            token: Token::extract(params),
            input: CredentialInput::default(),
            errors: ValidationErrors::default(),
            state: ControllerState::Idle,
            loading: LoadingFlag::new(),
            navigator: None,
        }
    }

    #[must_use]
    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.input = std::mem::take(&mut self.input).with_password(password);
    }

    pub fn set_confirm_password(&mut self, confirm_password: impl Into<String>) {
        self.input = std::mem::take(&mut self.input).with_confirm_password(confirm_password);
    }

    /// Replaces the stored errors and reports whether submission may proceed.
    pub fn validate(&mut self) -> bool {
        self.errors = validator::validate(&self.input, &self.config);
        self.errors.is_empty()
    }

    /// Validates, then sends the new password with the code.
    ///
    /// # Errors
    /// `FormError::Busy` while another submission is in flight,
    /// `FormError::NotIdle` until the previous result is dismissed and
    /// `FormError::Validation` when local checks fail. None of them touch
    /// the network. Server and transport failures are not errors here: they
    /// resolve to a failure outcome.
    pub async fn submit(&mut self) -> Result<Outcome, FormError> {
        if self.loading.is_loading() {
            return Err(FormError::Busy);
        }

        if self.state != ControllerState::Idle {
            return Err(FormError::NotIdle);
        }

        if !self.validate() {
            debug!("reset-password validation failed: {}", self.errors);
            return Err(FormError::Validation(self.errors.clone()));
        }

        let request = ResetPasswordRequest {
            code: self.token.as_str().to_string(),
            new_password: SecretString::from(self.input.password().expose_secret().to_string()),
        };

        let outcome = {
            let Some(_guard) = self.loading.acquire() else {
                return Err(FormError::Busy);
            };
            self.state = ControllerState::Submitting;
            resolve(
                self.api.reset_password(&request).await,
                RESET_PASSWORD_MESSAGES,
            )
        };

        if outcome.is_success() {
            info!("password reset accepted");
            self.input = CredentialInput::default();
        }

        self.state = ControllerState::Resolved(outcome.clone());
        Ok(outcome)
    }

    /// Closes the result overlay. Returns the destination navigated to, if
    /// any.
    pub fn dismiss(&mut self) -> Option<String> {
        dismiss_state(
            &mut self.state,
            self.config.success_redirect(),
            self.navigator.as_ref(),
        )
    }

    #[must_use]
    pub fn presentation(&self) -> Option<Presentation> {
        match &self.state {
            ControllerState::Resolved(outcome) => Some(Presentation::new(
                outcome,
                self.config.success_redirect(),
            )),
            _ => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn input(&self) -> &CredentialInput {
        &self.input
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    #[must_use]
    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }
}

/// Result of asking the verifier to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyStart {
    Submitted,
    MissingToken,
    AlreadyStarted,
}

/// Verify-email page: submits the code as soon as it is available, without
/// user interaction.
pub struct AutoVerifier<A> {
    api: A,
    config: FormConfig,
    token: Token,
    started: bool,
    state: ControllerState,
    loading: LoadingFlag,
}

impl<A: AuthApi> AutoVerifier<A> {
    #[must_use]
    pub fn new(api: A, config: FormConfig, params: &QueryParams) -> Self {
        Self {
            api,
            config,
            token: Token::extract(params),
            started: false,
            state: ControllerState::Idle,
            loading: LoadingFlag::new(),
        }
    }

    /// Fires the single verification request for this page instance.
    ///
    /// Without a code the verifier stays idle unless the config asks for
    /// empty codes to be sent anyway.
    pub async fn start(&mut self) -> VerifyStart {
        if self.started {
            return VerifyStart::AlreadyStarted;
        }

        if self.token.is_empty() && !self.config.submit_empty_token() {
            debug!("no verification code present, skipping request");
            return VerifyStart::MissingToken;
        }

        let Some(guard) = self.loading.acquire() else {
            return VerifyStart::AlreadyStarted;
        };
        self.started = true;
        self.state = ControllerState::Submitting;

        let request = VerifyEmailRequest {
            code: self.token.as_str().to_string(),
        };
        let outcome = resolve(self.api.verify_email(&request).await, VERIFY_EMAIL_MESSAGES);
        drop(guard);

        if outcome.is_success() {
            info!("email verification accepted");
        }
        self.state = ControllerState::Resolved(outcome);

        VerifyStart::Submitted
    }

    /// Closes the result overlay. Verification never navigates away.
    pub fn dismiss(&mut self) {
        dismiss_state(&mut self.state, None, None);
    }

    #[must_use]
    pub fn presentation(&self) -> Option<Presentation> {
        match &self.state {
            ControllerState::Resolved(outcome) => Some(Presentation::new(outcome, None)),
            _ => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[must_use]
    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::outcome::{GENERIC_FAULT, OutcomeKind};
    use crate::forms::validator::{Field, PASSWORDS_DO_NOT_MATCH, WEAK_PASSWORD};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Clone, Debug)]
    struct Call {
        method: &'static str,
        path: &'static str,
        body: Value,
        loading_during_call: Option<bool>,
    }

    /// Records every call and answers with a canned result.
    #[derive(Clone)]
    struct RecordingApi {
        calls: Arc<Mutex<Vec<Call>>>,
        reply: Result<ApiReply, FormError>,
        loading: Arc<Mutex<Option<LoadingFlag>>>,
    }

    impl RecordingApi {
        fn replying(reply: Result<ApiReply, FormError>) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                reply,
                loading: Arc::new(Mutex::new(None)),
            }
        }

        fn ok(message: Option<&str>) -> Self {
            Self::replying(Ok(ApiReply {
                message: message.map(ToString::to_string),
            }))
        }

        fn watch(&self, flag: LoadingFlag) {
            if let Ok(mut slot) = self.loading.lock() {
                *slot = Some(flag);
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }

        fn record(&self, method: &'static str, path: &'static str, body: Value) {
            let loading_during_call = self
                .loading
                .lock()
                .ok()
                .and_then(|slot| slot.as_ref().map(LoadingFlag::is_loading));
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(Call {
                    method,
                    path,
                    body,
                    loading_during_call,
                });
            }
        }
    }

    impl AuthApi for RecordingApi {
        async fn reset_password(
            &self,
            request: &ResetPasswordRequest,
        ) -> Result<ApiReply, FormError> {
            let body = serde_json::to_value(request).unwrap_or(Value::Null);
            self.record("POST", "/auth/reset-password", body);
            self.reply.clone()
        }

        async fn verify_email(&self, request: &VerifyEmailRequest) -> Result<ApiReply, FormError> {
            let body = serde_json::to_value(request).unwrap_or(Value::Null);
            self.record("PUT", "/auth/verify-email", body);
            self.reply.clone()
        }
    }

    fn params(query: &str) -> QueryParams {
        QueryParams::parse(query)
    }

    #[tokio::test]
    async fn reset_success_scenario() {
        let api = RecordingApi::ok(Some("Password reset successfully!"));
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=223344"));
        api.watch(form.loading());

        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");
        let outcome = form.submit().await;

        assert_eq!(outcome, Ok(Outcome::success("Password reset successfully!")));
        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/auth/reset-password");
        assert_eq!(
            calls[0].body,
            json!({"code": "223344", "newPassword": "Abcd1234!"})
        );
        assert_eq!(calls[0].loading_during_call, Some(true));
        assert!(!form.loading().is_loading());
        assert!(form.input().is_cleared());
        assert_eq!(
            form.state().outcome(),
            Some(SubmissionOutcome::Success(
                "Password reset successfully!".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn weak_password_never_reaches_network() {
        let api = RecordingApi::ok(None);
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=223344"));

        form.set_password("short");
        let result = form.submit().await;

        assert!(matches!(result, Err(FormError::Validation(_))));
        assert!(api.calls().is_empty());
        assert_eq!(form.errors().get(Field::Password), Some(WEAK_PASSWORD));
        assert_eq!(form.state(), &ControllerState::Idle);
        assert_eq!(form.state().outcome(), None);
    }

    #[tokio::test]
    async fn mismatch_blocks_submission() {
        let api = RecordingApi::ok(None);
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=1"));

        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234?");
        assert!(form.submit().await.is_err());

        assert!(api.calls().is_empty());
        assert_eq!(
            form.errors().get(Field::ConfirmPassword),
            Some(PASSWORDS_DO_NOT_MATCH)
        );
    }

    #[tokio::test]
    async fn errors_are_replaced_on_each_attempt() {
        let api = RecordingApi::ok(None);
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=1"));

        form.set_password("short");
        assert!(form.submit().await.is_err());
        assert_eq!(form.errors().len(), 2);

        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");
        assert!(form.submit().await.is_ok());
        assert!(form.errors().is_empty());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn missing_message_uses_default() {
        let api = RecordingApi::ok(None);
        let mut form = CredentialForm::new(api, FormConfig::default(), &params("code=1"));
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");

        let outcome = form.submit().await;
        assert_eq!(outcome, Ok(Outcome::success(RESET_PASSWORD_MESSAGES.success)));
    }

    #[tokio::test]
    async fn rejection_keeps_input_for_correction() {
        let api = RecordingApi::replying(Err(FormError::Rejected {
            status: 400,
            message: Some("Code expired".to_string()),
        }));
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=1"));
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");

        let outcome = form.submit().await;
        assert_eq!(outcome, Ok(Outcome::failure("Code expired")));
        assert!(!form.input().is_cleared());
        assert!(!form.loading().is_loading());

        // The user may dismiss and try again.
        assert_eq!(form.dismiss(), None);
        assert_eq!(form.state(), &ControllerState::Idle);
        assert!(form.submit().await.is_ok());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn resubmit_requires_dismissal() {
        let api = RecordingApi::ok(None);
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=1"));
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");
        assert!(form.submit().await.is_ok());

        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");
        let resolved = form.state().clone();
        assert_eq!(form.submit().await, Err(FormError::NotIdle));
        assert_eq!(form.state(), &resolved);
        assert!(form.errors().is_empty());
        assert_eq!(api.calls().len(), 1);

        form.dismiss();
        assert!(form.submit().await.is_ok());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn rejection_without_message_uses_default() {
        let api = RecordingApi::replying(Err(FormError::Rejected {
            status: 500,
            message: None,
        }));
        let mut form = CredentialForm::new(api, FormConfig::default(), &params("code=1"));
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");

        let outcome = form.submit().await;
        assert_eq!(outcome, Ok(Outcome::failure(RESET_PASSWORD_MESSAGES.rejected)));
    }

    #[tokio::test]
    async fn transport_fault_uses_generic_message() {
        let api = RecordingApi::replying(Err(FormError::Network("connection reset".to_string())));
        let mut form = CredentialForm::new(api, FormConfig::default(), &params("code=1"));
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");

        let outcome = form.submit().await;
        assert_eq!(outcome, Ok(Outcome::failure(GENERIC_FAULT)));
        assert!(!form.loading().is_loading());
    }

    #[tokio::test]
    async fn submit_refused_while_loading() {
        let api = RecordingApi::ok(None);
        let mut form = CredentialForm::new(api.clone(), FormConfig::default(), &params("code=1"));
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");

        let flag = form.loading();
        let held = flag.acquire();
        assert!(held.is_some());
        let result = form.submit().await;
        assert_eq!(result, Err(FormError::Busy));
        assert!(api.calls().is_empty());
        drop(held);

        assert!(form.submit().await.is_ok());
    }

    #[tokio::test]
    async fn dismiss_after_success_navigates_when_enabled() {
        let visited = Arc::new(Mutex::new(Vec::<String>::new()));
        let navigator: Navigator = {
            let visited = visited.clone();
            Arc::new(move |destination: &str| {
                if let Ok(mut visited) = visited.lock() {
                    visited.push(destination.to_string());
                }
            })
        };
        let config = FormConfig::default()
            .with_redirect_on_success(true)
            .with_login_url("/login");
        let mut form = CredentialForm::new(RecordingApi::ok(None), config, &params("code=1"))
            .with_navigator(navigator);
        form.set_password("Abcd1234!");
        form.set_confirm_password("Abcd1234!");
        assert!(form.submit().await.is_ok());

        let presentation = form.presentation();
        assert_eq!(
            presentation.as_ref().map(|p| p.kind),
            Some(OutcomeKind::Success)
        );
        assert_eq!(form.dismiss().as_deref(), Some("/login"));
        assert_eq!(form.state(), &ControllerState::Idle);
        assert!(form.presentation().is_none());
        assert_eq!(
            visited.lock().map(|v| v.clone()).unwrap_or_default(),
            vec!["/login".to_string()]
        );
    }

    #[tokio::test]
    async fn dismiss_is_idempotent() {
        let api = RecordingApi::replying(Err(FormError::Timeout("slow".to_string())));
        let mut verifier = AutoVerifier::new(api, FormConfig::default(), &params("code=223344"));
        assert_eq!(verifier.start().await, VerifyStart::Submitted);

        verifier.dismiss();
        assert_eq!(verifier.state(), &ControllerState::Idle);
        verifier.dismiss();
        assert_eq!(verifier.state(), &ControllerState::Idle);
    }

    #[tokio::test]
    async fn auto_verify_submits_once() {
        let api = RecordingApi::ok(Some("Email verified"));
        let mut verifier =
            AutoVerifier::new(api.clone(), FormConfig::default(), &params("code=223344"));
        api.watch(verifier.loading());

        assert_eq!(verifier.start().await, VerifyStart::Submitted);
        assert_eq!(verifier.start().await, VerifyStart::AlreadyStarted);

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].path, "/auth/verify-email");
        assert_eq!(calls[0].body, json!({"code": "223344"}));
        assert_eq!(calls[0].loading_during_call, Some(true));
        assert!(!verifier.loading().is_loading());
        assert_eq!(
            verifier.presentation().map(|p| p.message),
            Some("Email verified".to_string())
        );
    }

    #[tokio::test]
    async fn auto_verify_success_never_redirects() {
        let config = FormConfig::default().with_redirect_on_success(true);
        let mut verifier = AutoVerifier::new(RecordingApi::ok(None), config, &params("code=1"));
        assert_eq!(verifier.start().await, VerifyStart::Submitted);

        let presentation = verifier.presentation();
        assert_eq!(
            presentation.as_ref().map(|p| p.kind),
            Some(OutcomeKind::Success)
        );
        assert_eq!(presentation.and_then(|p| p.navigate_to), None);
    }

    #[tokio::test]
    async fn auto_verify_stays_idle_without_code() {
        let api = RecordingApi::ok(None);
        let mut verifier = AutoVerifier::new(api.clone(), FormConfig::default(), &params(""));

        assert_eq!(verifier.start().await, VerifyStart::MissingToken);
        assert!(api.calls().is_empty());
        assert_eq!(verifier.state(), &ControllerState::Idle);
        assert!(verifier.presentation().is_none());
    }

    #[tokio::test]
    async fn auto_verify_can_send_empty_code() {
        let api = RecordingApi::replying(Err(FormError::Rejected {
            status: 400,
            message: None,
        }));
        let config = FormConfig::default().with_submit_empty_token(true);
        let mut verifier = AutoVerifier::new(api.clone(), config, &params(""));

        assert_eq!(verifier.start().await, VerifyStart::Submitted);
        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].body, json!({"code": ""}));
        assert_eq!(
            verifier.state().outcome(),
            Some(SubmissionOutcome::Failure(
                VERIFY_EMAIL_MESSAGES.rejected.to_string()
            ))
        );
    }

    #[tokio::test]
    async fn auto_verify_failure_is_permanent() {
        let api = RecordingApi::replying(Err(FormError::Parse("bad".to_string())));
        let mut verifier = AutoVerifier::new(api.clone(), FormConfig::default(), &params("code=1"));

        verifier.start().await;
        verifier.dismiss();
        assert_eq!(verifier.start().await, VerifyStart::AlreadyStarted);
        assert_eq!(api.calls().len(), 1);
    }
}
