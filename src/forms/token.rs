//! One-shot extraction of the `code` query parameter. Pages receive their
//! invocation parameters as an explicit [`QueryParams`] value instead of
//! reading the location themselves, so tests can hand in any query.

use std::collections::HashMap;
use std::fmt;
use url::{form_urlencoded, Url};

/// Query parameter carrying the one-time code issued by the auth backend.
pub const CODE_PARAM: &str = "code";

/// Parsed query-string parameters of the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Parses a raw query string, with or without the leading `?`.
    /// When a key repeats, the first value wins.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut params = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self(params)
    }

    /// Reads the query of a full page link.
    ///
    /// # Errors
    /// Returns an error if `link` is not an absolute URL.
    pub fn from_link(link: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(link)?;
        Ok(Self::parse(url.query().unwrap_or_default()))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// The one-time code, empty when the page was opened without one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn extract(params: &QueryParams) -> Self {
        Self(params.get(CODE_PARAM).unwrap_or_default().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// Codes are single-use credentials, keep them out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Token(<empty>)")
        } else {
            f.write_str("Token(<redacted>)")
        }
    }
}
