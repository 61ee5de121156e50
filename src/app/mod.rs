//! # App Module
//!
//! Page state and its controller.
//!
//! [`AppState`] is a plain value updated through [`AppState::update`]: an
//! [`Event`] goes in, the state changes, and a list of [`Effect`]s comes
//! out. The [`Controller`] owns a state, a [`MusicBackend`] and a
//! [`KeyValueStore`], runs the effects and feeds their results back as
//! events. Tests drive either layer without a terminal.
//!
//! ## Status transitions
//!
//! ```text
//! Idle -> Authenticating -> Idle   (code exchange, success or failure)
//! Idle -> Loading        -> Idle   (track fetch, success or failure)
//! ```
//!
//! Each track request is stamped with a sequence number; a response that
//! does not carry the latest number is dropped, so a slow earlier request
//! can never overwrite a newer result.
//!
//! [`MusicBackend`]: crate::backend::MusicBackend
//! [`KeyValueStore`]: crate::management::KeyValueStore

mod controller;
mod location;
mod state;

pub use controller::Controller;
pub use location::{CallbackParams, Location};
pub use state::{
    AppState, EXCHANGE_FAILED_FALLBACK, Effect, Event, FETCH_FAILED_FALLBACK, Status,
};
