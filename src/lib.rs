//! toptracks library
//!
//! Signs in to Spotify through a token-exchange backend and shows the
//! user's top tracks in the terminal. The page state is an explicit value
//! updated by events, so everything except the terminal and network edges
//! can be driven from tests.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local landing server
//! - `app` - page state, events and the controller running them
//! - `backend` - client for the token-exchange backend
//! - `cli` - command-line interface implementations
//! - `config` - configuration from environment variables
//! - `management` - key-value persistence of the session
//! - `server` - local HTTP server receiving the login landing
//! - `types` - data structures shared across modules
//! - `view` - terminal rendering of the page
//!
//! # Example
//!
//! ```ignore
//! use toptracks::{app::{Controller, Location}, backend::ApiClient, management::MemoryStore};
//!
//! let client = ApiClient::new("http://127.0.0.1:8000", "http://127.0.0.1:5173")?;
//! let mut controller = Controller::new(client, MemoryStore::new());
//! let mut location = Location::parse("http://127.0.0.1:5173/callback?code=c&state=s")?;
//! controller.load_page(&mut location).await;
//! ```

pub mod api;
pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod types;
pub mod view;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI plumbing where any error ends up printed; library
/// layers return their own error types.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```ignore
/// info!("Opening {}", login_url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints to stderr with a red `!` and exits with status 1.
///
/// Only for CLI setup failures the user has to fix before retrying (bad
/// server address, unparseable landing URL). Library code reports errors
/// through the page state instead.
///
/// ```ignore
/// let listener = match server::bind(addr).await {
///     Ok(listener) => listener,
///     Err(e) => error!("Cannot start callback server. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints to stderr with a yellow `!`; execution continues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
