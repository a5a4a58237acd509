//! Server-rendered markup for the account-link pages.

use crate::forms::{
    outcome::DISMISS_LABEL, validator::SPECIAL_CHARACTERS, AuthApi, CredentialForm, Field,
    Presentation,
};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use secrecy::ExposeSecret;

pub const VERIFYING_NOTICE: &str = "Verifying your email, please wait...";
pub const MISSING_CODE_NOTICE: &str = "Missing verification code. Check your email link.";

// Upgrades the result dialog to a modal so it blocks the page until closed.
const MODAL_SCRIPT: &str = r#"
(function () {
  var dialog = document.getElementById("result");
  if (dialog && dialog.showModal) { dialog.close(); dialog.showModal(); }
})();
"#;

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | SCAMalicious" }
            }
            body {
                main { (body) }
            }
        }
    }
}

/// The blocking result overlay with its single dismissal action.
pub fn result_dialog(presentation: &Presentation) -> Markup {
    html! {
        dialog id="result" class={ "result " (presentation.kind.as_str()) } open {
            p class="message" { (presentation.message) }
            @if let Some(destination) = &presentation.navigate_to {
                a class="dismiss" href=(destination) { (DISMISS_LABEL) }
            } @else {
                form method="dialog" {
                    button class="dismiss" type="submit" { (DISMISS_LABEL) }
                }
            }
        }
        script { (PreEscaped(MODAL_SCRIPT)) }
    }
}

fn field_error(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="field-error" { (message) }
        }
    }
}

pub fn reset_password<A: AuthApi>(form: &CredentialForm<A>, action: &str) -> Markup {
    let errors = form.errors();
    let loading = form.loading().is_loading();
    let input = form.input();

    page(
        "Reset Password",
        html! {
            h2 { "Reset Password" }
            @if form.config().enforce_strength_policy() {
                p {
                    "Password field must contain at least a number, a special character ("
                    code { (SPECIAL_CHARACTERS) }
                    ") and must be at least 8 characters long."
                }
            }
            form class="reset-password" action=(action) method="POST" {
                label for="password" { "New Password" }
                input id="password" type="password" name="password"
                    placeholder="Enter New Password"
                    value=(input.password().expose_secret());
                (field_error(errors.get(Field::Password)))
                @if form.config().require_confirmation() {
                    label for="confirm_password" { "Confirm Password" }
                    input id="confirm_password" type="password" name="confirm_password"
                        placeholder="Confirm Password"
                        value=(input.confirm_password().expose_secret());
                    (field_error(errors.get(Field::ConfirmPassword)))
                }
                button type="submit" disabled[loading] {
                    @if loading { "Resetting..." } @else { "Reset Password" }
                }
            }
            @if let Some(presentation) = form.presentation() {
                (result_dialog(&presentation))
            }
        },
    )
}

pub fn verify_email(presentation: Option<&Presentation>, missing_code: bool) -> Markup {
    page(
        "Verify Email",
        html! {
            @if missing_code {
                p class="notice" { (MISSING_CODE_NOTICE) }
            } @else {
                p { (VERIFYING_NOTICE) }
            }
            @if let Some(presentation) = presentation {
                (result_dialog(presentation))
            }
        },
    )
}

/// Links into both flows with a sample code, for manual testing.
pub fn navigation(verify_href: &str, reset_href: &str) -> Markup {
    page(
        "Test",
        html! {
            ul {
                li { a href=(verify_href) { "Verify email" } }
                li { a href=(reset_href) { "Reset password" } }
            }
        },
    )
}
