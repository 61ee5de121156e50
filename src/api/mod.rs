//! # API Module
//!
//! HTTP endpoints of the local landing server. The server stands in for
//! the page origin: after authorization the backend sends the browser to
//! `<origin>/callback?code=...&state=...`, and the handler records that
//! full URL for the waiting `login` command.
//!
//! ## Endpoints
//!
//! - [`callback`] - records the landing URL (first one wins) and answers
//!   with a short HTML page.
//! - [`health`] - returns status and version for quick checks.
//!
//! The code exchange itself is not done here; it runs through the
//! controller exactly as it does for a pasted URL.

mod callback;
mod health;

pub use callback::{PageOrigin, callback};
pub use health::health;
