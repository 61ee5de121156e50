use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;

use crate::types::{AuthSession, TopTracks, TrackQuery};

use super::ApiError;

pub const LOGIN_PATH: &str = "/auth/login";
pub const CALLBACK_PATH: &str = "/auth/callback";
pub const TOP_TRACKS_PATH: &str = "/auth/top-tracks";

/// The two backend calls the controller depends on.
#[async_trait]
pub trait MusicBackend: Send + Sync {
    async fn exchange_code_for_token(
        &self,
        code: &str,
        state: &str,
        redirect_uri: Option<&str>,
    ) -> Result<AuthSession, ApiError>;

    async fn fetch_top_tracks(
        &self,
        access_token: &str,
        query: TrackQuery,
    ) -> Result<TopTracks, ApiError>;
}

/// HTTP client for the token-exchange backend.
///
/// Holds no per-user state apart from the cookie jar, which the backend
/// needs to correlate the OAuth `state` it issued at login.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Creates a client for `base_url`. An empty base means same origin and
    /// resolves against `origin`.
    pub fn new(base_url: &str, origin: &str) -> Result<Self, ApiError> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: resolve_base_url(base_url, origin),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_login_url(&self, redirect_uri: &str, forward_to: &str) -> String {
        build_login_url(&self.base_url, redirect_uri, forward_to)
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = format!("{base}{path}", base = self.base_url);
        let response = self.http.get(&url).query(params).send().await?;
        handle_response(response).await
    }
}

#[async_trait]
impl MusicBackend for ApiClient {
    async fn exchange_code_for_token(
        &self,
        code: &str,
        state: &str,
        redirect_uri: Option<&str>,
    ) -> Result<AuthSession, ApiError> {
        let mut params = vec![("code", code), ("state", state), ("exchange_only", "true")];
        if let Some(uri) = redirect_uri.filter(|uri| !uri.is_empty()) {
            params.push(("redirect_uri", uri));
        }

        let body = self.get(CALLBACK_PATH, &params).await?;
        Ok(AuthSession::new(body))
    }

    async fn fetch_top_tracks(
        &self,
        access_token: &str,
        query: TrackQuery,
    ) -> Result<TopTracks, ApiError> {
        let limit = query.limit.to_string();
        let params = [
            ("access_token", access_token),
            ("limit", limit.as_str()),
            ("time_range", query.time_range.as_str()),
        ];

        let body = self.get(TOP_TRACKS_PATH, &params).await?;
        if body.is_object() {
            Ok(serde_json::from_value(body)?)
        } else {
            Ok(TopTracks::default())
        }
    }
}

/// Trims whitespace and a single trailing slash.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}

pub fn resolve_base_url(base_url: &str, origin: &str) -> String {
    let base = normalize_base_url(base_url);
    if base.is_empty() {
        normalize_base_url(origin)
    } else {
        base
    }
}

/// Login link under `{base_url}/auth/login`. Empty arguments are left out
/// of the query.
pub fn build_login_url(base_url: &str, redirect_uri: &str, forward_to: &str) -> String {
    let mut params: Vec<(&str, &str)> = Vec::new();
    if !redirect_uri.is_empty() {
        params.push(("redirect_uri", redirect_uri));
    }
    if !forward_to.is_empty() {
        params.push(("forward_to", forward_to));
    }

    let query = serde_urlencoded::to_string(&params).unwrap_or_default();
    if query.is_empty() {
        format!("{base_url}{LOGIN_PATH}")
    } else {
        format!("{base_url}{LOGIN_PATH}?{query}")
    }
}

async fn handle_response(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains("application/json"));

    let raw = response.text().await?;

    if !status.is_success() {
        let body = if is_json {
            serde_json::from_str::<Value>(&raw).ok()
        } else {
            None
        };
        return Err(ApiError::Status {
            status,
            message: error_detail(status, body.as_ref(), &raw),
        });
    }

    // a body announced as JSON must parse; only other content types fall back to text
    if is_json {
        Ok(serde_json::from_str::<Value>(&raw)?)
    } else {
        Ok(Value::String(raw))
    }
}

/// Error text precedence: the `detail` field of a JSON object, then the raw
/// body, then a generic message carrying the status code.
pub fn error_detail(status: StatusCode, body: Option<&Value>, raw: &str) -> String {
    match body {
        Some(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
            Some(detail) if !is_blank(detail) => return detail.to_string(),
            _ => {}
        },
        Some(Value::String(text)) if !text.is_empty() => return text.clone(),
        _ => {}
    }

    if !raw.is_empty() {
        return raw.to_string();
    }

    format!("Request failed with status {}", status.as_u16())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
