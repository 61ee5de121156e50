//! # Backend Module
//!
//! Client for the token-exchange backend that sits between this tool and
//! Spotify. The backend owns the OAuth client secret, performs the
//! authorization-code exchange and proxies the top-tracks endpoint; this
//! module only builds requests and normalizes responses.
//!
//! ## Endpoints
//!
//! | Method | Path | Query |
//! |---|---|---|
//! | GET | `/auth/login` | `redirect_uri`, `forward_to` (link target only) |
//! | GET | `/auth/callback` | `code`, `state`, `exchange_only=true`, `redirect_uri` |
//! | GET | `/auth/top-tracks` | `access_token`, `limit`, `time_range` |
//!
//! ## Error Handling
//!
//! Every non-success response becomes [`ApiError::Status`] carrying a single
//! human-readable message, taken from the JSON `detail` field, the raw body,
//! or a generic text with the status code, in that order. Nothing is
//! retried.

mod client;
mod error;

pub use client::{
    ApiClient, CALLBACK_PATH, LOGIN_PATH, MusicBackend, TOP_TRACKS_PATH, build_login_url,
    error_detail, normalize_base_url, resolve_base_url,
};
pub use error::ApiError;
