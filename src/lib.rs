//! # SCAMalicious account-link pages
//!
//! The auth backend emails users links carrying a one-time `code`. This
//! crate serves the pages those links open and drives the single request
//! each page makes:
//!
//! - **Reset password** (`/forgot-password?code=…`): the user types a new
//!   password (and its confirmation), it is checked locally, then sent with
//!   the code to `POST /auth/reset-password`.
//! - **Verify email** (`/verify?code=…`): the code is sent to
//!   `PUT /auth/verify-email` as soon as the page opens.
//!
//! Both flows show the result in a blocking dialog with one "Close" action.
//! The flow logic lives in [`forms`] and is independent of the web layer,
//! so the same flows also run from the command line.

pub mod cli;
pub mod forms;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
