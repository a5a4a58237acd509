//! Flow logic for the account-link pages: token extraction, password
//! validation, the submission state machine and the auth API client.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod loading;
pub mod outcome;
pub mod token;
pub mod validator;

pub use client::{AuthApi, HttpAuthApi, DEFAULT_API_BASE_URL};
pub use config::FormConfig;
pub use controller::{AutoVerifier, ControllerState, CredentialForm, Navigator, VerifyStart};
pub use error::FormError;
pub use loading::LoadingFlag;
pub use outcome::{Outcome, OutcomeKind, Presentation, SubmissionOutcome};
pub use token::{QueryParams, Token};
pub use validator::{CredentialInput, Field, ValidationErrors};
