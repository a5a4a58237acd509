//! Per-deployment switches for the account-link pages. One flow
//! implementation serves every page variant; each page picks its
//! combination of options here instead of forking the logic.

/// Default destination offered after a successful password reset.
pub const DEFAULT_LOGIN_URL: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    require_confirmation: bool,
    enforce_strength_policy: bool,
    redirect_on_success: bool,
    login_url: String,
    submit_empty_token: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            require_confirmation: true,
            enforce_strength_policy: true,
            redirect_on_success: false,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            submit_empty_token: false,
        }
    }
}

impl FormConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_require_confirmation(mut self, value: bool) -> Self {
        self.require_confirmation = value;
        self
    }

    #[must_use]
    pub fn with_enforce_strength_policy(mut self, value: bool) -> Self {
        self.enforce_strength_policy = value;
        self
    }

    #[must_use]
    pub fn with_redirect_on_success(mut self, value: bool) -> Self {
        self.redirect_on_success = value;
        self
    }

    #[must_use]
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Auto-verification normally stays idle without a code. Setting this
    /// sends `{"code":""}` anyway and lets the server answer.
    #[must_use]
    pub fn with_submit_empty_token(mut self, value: bool) -> Self {
        self.submit_empty_token = value;
        self
    }

    #[must_use]
    pub const fn require_confirmation(&self) -> bool {
        self.require_confirmation
    }

    #[must_use]
    pub const fn enforce_strength_policy(&self) -> bool {
        self.enforce_strength_policy
    }

    #[must_use]
    pub const fn redirect_on_success(&self) -> bool {
        self.redirect_on_success
    }

    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    #[must_use]
    pub const fn submit_empty_token(&self) -> bool {
        self.submit_empty_token
    }

    /// Where dismissing a successful reset navigates, if anywhere.
    #[must_use]
    pub fn success_redirect(&self) -> Option<&str> {
        self.redirect_on_success.then_some(self.login_url.as_str())
    }
}
