pub mod health;
pub use self::health::health;

pub mod navigation;
pub mod reset_password;
pub mod verify_email;

// common functions for the handlers
use url::form_urlencoded;

/// Link to a page carrying `code`, or the bare page when there is none.
pub fn page_href(path: &str, code: &str) -> String {
    if code.is_empty() {
        return path.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(crate::forms::token::CODE_PARAM, code)
        .finish();
    format!("{path}?{query}")
}
