use crate::types::{AuthSession, Track};

pub const EXCHANGE_FAILED_FALLBACK: &str = "Failed to complete Spotify login";
pub const FETCH_FAILED_FALLBACK: &str = "Could not load tracks";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Authenticating,
    Loading,
}

impl Status {
    pub fn is_idle(&self) -> bool {
        matches!(self, Status::Idle)
    }
}

/// Inputs to [`AppState::update`].
///
/// Failures carry the already extracted human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw stored session read at page load; `None` when the key is absent.
    SessionRestored(Option<String>),
    CallbackReceived { code: String, state: String },
    ExchangeFinished(Result<AuthSession, String>),
    /// Automatic fetch, issued whenever a usable session appears.
    FetchRequested,
    /// User-triggered refresh; ignored unless idle.
    RefreshRequested,
    TracksFetched {
        seq: u64,
        result: Result<Vec<Track>, String>,
    },
    LogoutRequested,
}

/// Work requested by the state for the controller to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Exchange { code: String, state: String },
    FetchTracks { access_token: String, seq: u64 },
    PersistSession(AuthSession),
    ClearStoredSession,
}

/// Everything the page shows, with no I/O attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    session: Option<AuthSession>,
    tracks: Vec<Track>,
    status: Status,
    error: Option<String>,
    fetch_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().and_then(AuthSession::access_token)
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the most recently issued track request.
    pub fn fetch_seq(&self) -> u64 {
        self.fetch_seq
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SessionRestored(None) => Vec::new(),
            // an empty stored value counts as absent and stays in place
            Event::SessionRestored(Some(raw)) if raw.is_empty() => Vec::new(),
            Event::SessionRestored(Some(raw)) => match AuthSession::from_stored(&raw) {
                Ok(session) => {
                    self.session = session;
                    self.begin_fetch().into_iter().collect()
                }
                Err(_) => {
                    // corrupt value: forget it without telling the user
                    self.session = None;
                    vec![Effect::ClearStoredSession]
                }
            },
            Event::CallbackReceived { code, state } => {
                self.status = Status::Authenticating;
                self.error = None;
                vec![Effect::Exchange { code, state }]
            }
            Event::ExchangeFinished(result) => {
                self.status = Status::Idle;
                match result {
                    Ok(session) => {
                        self.session = Some(session.clone());
                        let mut effects = vec![Effect::PersistSession(session)];
                        effects.extend(self.begin_fetch());
                        effects
                    }
                    Err(message) => {
                        self.error = Some(or_fallback(message, EXCHANGE_FAILED_FALLBACK));
                        Vec::new()
                    }
                }
            }
            Event::FetchRequested => self.begin_fetch().into_iter().collect(),
            Event::RefreshRequested => {
                if !self.status.is_idle() {
                    return Vec::new();
                }
                self.begin_fetch().into_iter().collect()
            }
            Event::TracksFetched { seq, result } => {
                if seq != self.fetch_seq {
                    return Vec::new();
                }
                self.status = Status::Idle;
                match result {
                    Ok(tracks) => self.tracks = tracks,
                    Err(message) => {
                        self.error = Some(or_fallback(message, FETCH_FAILED_FALLBACK));
                    }
                }
                Vec::new()
            }
            Event::LogoutRequested => {
                if self.status == Status::Loading {
                    // in-flight responses no longer apply
                    self.fetch_seq += 1;
                    self.status = Status::Idle;
                }
                self.session = None;
                self.tracks.clear();
                vec![Effect::ClearStoredSession]
            }
        }
    }

    fn begin_fetch(&mut self) -> Option<Effect> {
        let access_token = self.access_token()?.to_string();
        self.status = Status::Loading;
        self.error = None;
        self.fetch_seq += 1;
        Some(Effect::FetchTracks {
            access_token,
            seq: self.fetch_seq,
        })
    }
}

fn or_fallback(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
