//! Configuration management for toptracks.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every value has a default, so a bare
//! install talks to a backend on the same origin as the local landing
//! server.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::backend::normalize_base_url;

pub const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8000/auth/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `toptracks` data directory if it doesn't exist. A missing
/// `.env` file is not an error; variables already present in the process
/// environment are never overridden.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/toptracks/.env`
/// - macOS: `~/Library/Application Support/toptracks/.env`
/// - Windows: `%LOCALAPPDATA%/toptracks/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or the
/// `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("toptracks/.env");
    path
}

/// Trimmed value of `name`; empty counts as unset.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Returns the backend base URL.
///
/// Reads `API_BASE_URL`, dropping one trailing slash. Empty when unset,
/// which means "same origin as the page".
pub fn api_base_url() -> String {
    var("API_BASE_URL")
        .map(|url| normalize_base_url(&url))
        .unwrap_or_default()
}

/// Returns the OAuth redirect URI registered with Spotify.
///
/// Reads `SPOTIFY_REDIRECT_URI`, defaulting to the backend's callback at
/// `http://127.0.0.1:8000/auth/callback`.
pub fn spotify_redirect_uri() -> String {
    var("SPOTIFY_REDIRECT_URI").unwrap_or_else(|| DEFAULT_SPOTIFY_REDIRECT_URI.to_string())
}

/// Returns the address the local landing server binds to.
///
/// Reads `SERVER_ADDRESS`, e.g. `127.0.0.1:5173`.
pub fn server_addr() -> String {
    var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the URI the backend should send the browser back to after login.
///
/// Reads `FRONTEND_REDIRECT_URI`, defaulting to `<page origin>/callback`.
pub fn frontend_redirect_uri(page_origin: &str) -> String {
    var("FRONTEND_REDIRECT_URI").unwrap_or_else(|| format!("{page_origin}/callback"))
}

/// How long `login` waits for the browser to land on the callback.
pub fn login_timeout() -> Duration {
    let secs = var("LOGIN_TIMEOUT_SECS")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_LOGIN_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub spotify_redirect_uri: String,
    pub frontend_redirect_uri: String,
    pub server_addr: String,
    pub login_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let server_addr = server_addr();
        let origin = page_origin(&server_addr);
        Self {
            api_base_url: api_base_url(),
            spotify_redirect_uri: spotify_redirect_uri(),
            frontend_redirect_uri: frontend_redirect_uri(&origin),
            server_addr,
            login_timeout: login_timeout(),
        }
    }

    /// Origin of the local landing server, which plays the page's origin.
    pub fn page_origin(&self) -> String {
        page_origin(&self.server_addr)
    }
}

pub fn page_origin(server_addr: &str) -> String {
    format!("http://{server_addr}")
}
