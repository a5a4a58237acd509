//! Local checks run before a new password is sent to the auth API.

use super::config::FormConfig;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::fmt;

pub const EMPTY_PASSWORD: &str = "Password cannot be empty.";
pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 characters, include a number and a special character.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";

/// Special characters accepted by the strength policy.
pub const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Password,
    ConfirmPassword,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Field-level messages from the latest validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

/// Password and confirmation as typed. Updates return a new value.
#[derive(Debug)]
pub struct CredentialInput {
    password: SecretString,
    confirm_password: SecretString,
}

impl Default for CredentialInput {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl CredentialInput {
    #[must_use]
    pub fn new(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    #[must_use]
    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self {
            password: SecretString::from(password.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_confirm_password(self, confirm_password: impl Into<String>) -> Self {
        Self {
            confirm_password: SecretString::from(confirm_password.into()),
            ..self
        }
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    #[must_use]
    pub fn confirm_password(&self) -> &SecretString {
        &self.confirm_password
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.password.expose_secret().is_empty() && self.confirm_password.expose_secret().is_empty()
    }
}

/// At least 8 characters from the allowed set, with a letter, a digit and a
/// special character.
#[must_use]
pub fn strong_password(password: &str) -> bool {
    let allowed = Regex::new(r#"^[A-Za-z0-9!@#$%^&*(),.?":{}|<>]{8,}$"#)
        .map_or(false, |re| re.is_match(password));
    let letter = Regex::new(r"[A-Za-z]").map_or(false, |re| re.is_match(password));
    let digit = Regex::new(r"[0-9]").map_or(false, |re| re.is_match(password));
    let special = Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).map_or(false, |re| re.is_match(password));

    allowed && letter && digit && special
}

#[must_use]
pub fn validate(input: &CredentialInput, config: &FormConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let password = input.password.expose_secret();

    if password.is_empty() {
        errors.insert(Field::Password, EMPTY_PASSWORD);
    } else if config.enforce_strength_policy() && !strong_password(password) {
        errors.insert(Field::Password, WEAK_PASSWORD);
    }

    if config.require_confirmation() && password != input.confirm_password.expose_secret() {
        errors.insert(Field::ConfirmPassword, PASSWORDS_DO_NOT_MATCH);
    }

    errors
}
