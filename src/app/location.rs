use std::fmt;

use reqwest::Url;

/// `code`/`state` pair delivered on the authorization landing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl CallbackParams {
    /// Both values, when both are present.
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (&self.code, &self.state) {
            (Some(code), Some(state)) => Some((code, state)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.state.is_none()
    }
}

/// The current page address.
///
/// Mirrors the browser location: it can be read and its history entry
/// replaced, which never triggers a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(input: &str) -> Result<Self, String> {
        Url::parse(input.trim())
            .map(|url| Self { url })
            .map_err(|e| format!("invalid page URL {input:?}: {e}"))
    }

    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// First value of `name` in the query. Empty values count as absent.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    pub fn callback_params(&self) -> CallbackParams {
        CallbackParams {
            code: self.query_param("code"),
            state: self.query_param("state"),
        }
    }

    /// Drops the whole query string, like `history.replaceState` with an
    /// emptied `search`.
    pub fn clear_query(&mut self) {
        self.url.set_query(None);
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_callback_params() {
        let location = Location::parse("http://127.0.0.1:5173/callback?code=abc&state=xyz").unwrap();
        let params = location.callback_params();
        assert_eq!(params.complete(), Some(("abc", "xyz")));
        assert_eq!(location.origin(), "http://127.0.0.1:5173");
    }

    #[test]
    fn partial_params_are_not_complete() {
        let location = Location::parse("http://127.0.0.1:5173/callback?code=abc").unwrap();
        let params = location.callback_params();
        assert!(params.complete().is_none());
        assert!(!params.is_empty());

        let location = Location::parse("http://127.0.0.1:5173/callback?code=&state=s").unwrap();
        assert_eq!(location.callback_params().code, None);
    }

    #[test]
    fn clear_query_keeps_path() {
        let mut location =
            Location::parse("http://127.0.0.1:5173/callback?code=abc&state=xyz&other=1").unwrap();
        location.clear_query();
        assert_eq!(location.as_str(), "http://127.0.0.1:5173/callback");
    }

    #[test]
    fn rejects_relative_urls() {
        assert!(Location::parse("/callback?code=1").is_err());
    }
}
