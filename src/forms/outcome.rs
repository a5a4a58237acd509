//! Terminal results of a submission and how they are presented.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Failure,
}

impl OutcomeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// A settled submission with the message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

/// Outcome of the current attempt as seen from outside the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pending,
    Success(String),
    Failure(String),
}

impl From<&Outcome> for SubmissionOutcome {
    fn from(outcome: &Outcome) -> Self {
        match outcome.kind {
            OutcomeKind::Success => Self::Success(outcome.message.clone()),
            OutcomeKind::Failure => Self::Failure(outcome.message.clone()),
        }
    }
}

/// Messages a flow falls back to when the server does not send one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultMessages {
    pub success: &'static str,
    pub rejected: &'static str,
    pub fault: &'static str,
}

pub const GENERIC_FAULT: &str = "An error occurred. Please try again.";

pub const RESET_PASSWORD_MESSAGES: DefaultMessages = DefaultMessages {
    success: "Password reset successfully!",
    rejected: "Failed to reset password.",
    fault: GENERIC_FAULT,
};

pub const VERIFY_EMAIL_MESSAGES: DefaultMessages = DefaultMessages {
    success: "Email verified successfully!",
    rejected: "Verification failed. Please try again.",
    fault: GENERIC_FAULT,
};

/// Label of the single dismissal action.
pub const DISMISS_LABEL: &str = "Close";

/// What the blocking result overlay shows. Only exists for a settled
/// submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub kind: OutcomeKind,
    pub message: String,
    /// Where dismissal navigates, `None` to stay on the page.
    pub navigate_to: Option<String>,
}

impl Presentation {
    /// `redirect` is only followed after a success.
    #[must_use]
    pub fn new(outcome: &Outcome, redirect: Option<&str>) -> Self {
        let navigate_to = redirect
            .filter(|_| outcome.is_success())
            .map(ToString::to_string);
        Self {
            kind: outcome.kind,
            message: outcome.message.clone(),
            navigate_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_follows_given_redirect() {
        let outcome = Outcome::success("Password reset successfully!");

        let presentation = Presentation::new(&outcome, None);
        assert_eq!(presentation.navigate_to, None);

        let presentation = Presentation::new(&outcome, Some("/signin"));
        assert_eq!(presentation.navigate_to.as_deref(), Some("/signin"));
        assert_eq!(presentation.kind, OutcomeKind::Success);
    }

    #[test]
    fn failure_never_redirects() {
        let presentation = Presentation::new(&Outcome::failure("nope"), Some("/login"));
        assert_eq!(presentation.navigate_to, None);
        assert_eq!(presentation.message, "nope");
    }

    #[test]
    fn submission_outcome_from_outcome() {
        assert_eq!(
            SubmissionOutcome::from(&Outcome::success("ok")),
            SubmissionOutcome::Success("ok".to_string())
        );
        assert_eq!(
            SubmissionOutcome::from(&Outcome::failure("no")),
            SubmissionOutcome::Failure("no".to_string())
        );
    }
}
