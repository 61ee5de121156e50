use std::{collections::VecDeque, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    backend::MusicBackend,
    management::{KeyValueStore, SESSION_STORAGE_KEY},
    types::{TopTracks, TrackQuery},
    warning,
};

use super::{
    location::Location,
    state::{AppState, Effect, Event},
};

/// Drives an [`AppState`] by executing the effects it asks for.
///
/// Effects run one at a time in the order they were produced; an effect
/// that yields a follow-up event feeds it straight back into the state.
pub struct Controller<B, S> {
    backend: B,
    store: S,
    state: AppState,
    query: TrackQuery,
    redirect_uri: Option<String>,
    progress: bool,
}

impl<B: MusicBackend, S: KeyValueStore> Controller<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            state: AppState::new(),
            query: TrackQuery::default(),
            redirect_uri: None,
            progress: false,
        }
    }

    pub fn with_query(mut self, query: TrackQuery) -> Self {
        self.query = query;
        self
    }

    /// Redirect URI registered with the provider, forwarded on exchange.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        let redirect_uri = redirect_uri.into();
        self.redirect_uri = (!redirect_uri.is_empty()).then_some(redirect_uri);
        self
    }

    /// Shows a spinner carrying the status text while requests run.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Initial load: restore the stored session, then complete a pending
    /// authorization found in `location`. Callback parameters are removed
    /// from `location` whatever the exchange outcome.
    pub async fn load_page(&mut self, location: &mut Location) {
        let stored = match self.store.load(SESSION_STORAGE_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                warning!("Cannot read stored session. Err: {}", e);
                None
            }
        };
        self.dispatch(Event::SessionRestored(stored)).await;

        let params = location.callback_params();
        if let Some((code, state)) = params.complete() {
            self.dispatch(Event::CallbackReceived {
                code: code.to_string(),
                state: state.to_string(),
            })
            .await;
        }

        if !params.is_empty() {
            location.clear_query();
        }
    }

    /// Same as the automatic fetch. Ignored while another request runs.
    pub async fn refresh(&mut self) {
        self.dispatch(Event::RefreshRequested).await;
    }

    pub async fn fetch_tracks(&mut self) {
        self.dispatch(Event::FetchRequested).await;
    }

    pub async fn logout(&mut self) {
        self.dispatch(Event::LogoutRequested).await;
    }

    pub async fn dispatch(&mut self, event: Event) {
        let mut pending: VecDeque<Effect> = self.state.update(event).into();
        while let Some(effect) = pending.pop_front() {
            if let Some(next) = self.run(effect).await {
                pending.extend(self.state.update(next));
            }
        }
    }

    async fn run(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Exchange { code, state } => {
                let pb = self.spinner("Connecting to Spotify...");
                let result = self
                    .backend
                    .exchange_code_for_token(&code, &state, self.redirect_uri.as_deref())
                    .await
                    .map_err(|e| e.to_string());
                finish(pb);
                Some(Event::ExchangeFinished(result))
            }
            Effect::FetchTracks { access_token, seq } => {
                let pb = self.spinner("Loading your top tracks...");
                let result = self
                    .backend
                    .fetch_top_tracks(&access_token, self.query)
                    .await
                    .map(TopTracks::into_items)
                    .map_err(|e| e.to_string());
                finish(pb);
                Some(Event::TracksFetched { seq, result })
            }
            Effect::PersistSession(session) => {
                match session.to_stored() {
                    Ok(raw) => {
                        if let Err(e) = self.store.save(SESSION_STORAGE_KEY, &raw).await {
                            warning!("Failed to save session. Err: {}", e);
                        }
                    }
                    Err(e) => warning!("Failed to serialize session. Err: {}", e),
                }
                None
            }
            Effect::ClearStoredSession => {
                if let Err(e) = self.store.remove(SESSION_STORAGE_KEY).await {
                    warning!("Failed to remove stored session. Err: {}", e);
                }
                None
            }
        }
    }

    fn spinner(&self, message: &'static str) -> Option<ProgressBar> {
        if !self.progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        Some(pb)
    }
}

fn finish(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
