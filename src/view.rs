//! Terminal rendering of the application state.
//!
//! [`Page::build`] is a pure projection of [`AppState`]; printing goes
//! through its `Display` implementation, which adds colors and the track
//! table.

use std::fmt;

use colored::Colorize;
use tabled::Table;

use crate::{
    app::{AppState, Status},
    types::{Track, TrackTableRow},
};

pub const LOGIN_HINT: &str = "After authorizing, you'll land back here automatically.";
pub const LOGGED_OUT_TRACKS_HINT: &str = "Log in with Spotify to load your data.";
pub const NO_TRACKS_HINT: &str = "No tracks yet. Try refreshing after you listen to some music.";

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Present only while logged out.
    pub login_url: Option<String>,
    pub logged_in: bool,
    pub refresh_label: &'static str,
    pub refresh_enabled: bool,
    pub token_preview: Option<String>,
    pub status_text: &'static str,
    pub error: Option<String>,
    pub tracks_hint: Option<&'static str>,
    pub rows: Vec<TrackTableRow>,
}

impl Page {
    pub fn build(state: &AppState, login_url: &str) -> Self {
        let logged_in = state.is_logged_in();
        let status = state.status();

        let tracks_hint = if !logged_in {
            Some(LOGGED_OUT_TRACKS_HINT)
        } else if state.tracks().is_empty() && status.is_idle() {
            Some(NO_TRACKS_HINT)
        } else {
            None
        };

        Self {
            login_url: (!logged_in).then(|| login_url.to_string()),
            logged_in,
            refresh_label: if status == Status::Loading {
                "Refreshing..."
            } else {
                "Refresh tracks"
            },
            refresh_enabled: status.is_idle(),
            token_preview: state.session().and_then(|s| s.token_preview()),
            status_text: status_text(status, logged_in),
            error: state.error().filter(|e| !e.is_empty()).map(str::to_string),
            tracks_hint,
            rows: track_rows(state.tracks()),
        }
    }
}

pub fn status_text(status: Status, logged_in: bool) -> &'static str {
    match status {
        Status::Authenticating => "Connecting to Spotify...",
        Status::Loading => "Loading your top tracks...",
        Status::Idle if logged_in => "Ready",
        Status::Idle => "Waiting for login",
    }
}

/// Rank-ordered rows, starting at `#1`.
pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(idx, track)| TrackTableRow {
            rank: format!("#{}", idx + 1),
            title: track.name.clone(),
            meta: track.meta_line(),
        })
        .collect()
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "Spotify Stats".green().bold())?;
        writeln!(f, "See your top tracks without leaving the terminal")?;
        writeln!(f)?;

        if let Some(url) = &self.login_url {
            writeln!(f, "{} {}", "Log in with Spotify:".bold(), url.as_str().underline())?;
            writeln!(f, "{}", LOGIN_HINT.dimmed())?;
        } else {
            let label = format!("refresh ({})", self.refresh_label);
            let refresh = if self.refresh_enabled {
                label.as_str().normal()
            } else {
                label.as_str().dimmed()
            };
            writeln!(f, "{} {} | logout (Sign out)", "Controls:".bold(), refresh)?;
        }
        writeln!(f)?;

        writeln!(f, "{} {}", "Status:".bold(), self.status_text)?;
        if let Some(preview) = &self.token_preview {
            writeln!(f, "{} {}", "Access token:".bold(), preview)?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "{}", error.as_str().red())?;
        }
        writeln!(f)?;

        writeln!(f, "{}", "Top tracks: your current favorites".bold())?;
        if let Some(hint) = self.tracks_hint {
            writeln!(f, "{}", hint.dimmed())?;
        }
        if !self.rows.is_empty() {
            writeln!(f, "{}", Table::new(self.rows.clone()))?;
        }
        Ok(())
    }
}
