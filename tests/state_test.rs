use serde_json::json;
use toptracks::app::{
    AppState, EXCHANGE_FAILED_FALLBACK, Effect, Event, FETCH_FAILED_FALLBACK, Status,
};
use toptracks::types::{AlbumRef, ArtistRef, AuthSession, Track};

fn session(token: &str) -> AuthSession {
    AuthSession::new(json!({"access_token": token, "token_type": "Bearer"}))
}

fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: Some(vec![ArtistRef {
            name: "Artist X".to_string(),
        }]),
        album: Some(AlbumRef {
            name: "Album Y".to_string(),
        }),
    }
}

fn fetch_effects(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::FetchTracks { .. }))
        .count()
}

#[test]
fn test_malformed_stored_session_is_discarded_silently() {
    for raw in ["{", "not json", "{\"access_token\":", "[1,2"] {
        let mut state = AppState::new();
        let effects = state.update(Event::SessionRestored(Some(raw.to_string())));

        assert!(state.session().is_none(), "raw: {raw:?}");
        assert!(!state.is_logged_in());
        assert!(state.error().is_none());
        assert_eq!(effects, vec![Effect::ClearStoredSession]);
    }
}

#[test]
fn test_stored_session_without_token_does_not_fetch() {
    for raw in [
        r#"{"token_type":"Bearer"}"#,
        r#"{"access_token":""}"#,
        r#"{"access_token":null}"#,
        r#""just a string""#,
        "null",
    ] {
        let mut state = AppState::new();
        let effects = state.update(Event::SessionRestored(Some(raw.to_string())));

        assert_eq!(fetch_effects(&effects), 0, "raw: {raw:?}");
        assert!(!state.is_logged_in());
        assert_eq!(state.status(), Status::Idle);
    }
}

#[test]
fn test_stored_session_with_token_fetches_once() {
    let mut state = AppState::new();
    let effects = state.update(Event::SessionRestored(Some(
        r#"{"access_token":"abc","refresh_token":"r"}"#.to_string(),
    )));

    assert_eq!(
        effects,
        vec![Effect::FetchTracks {
            access_token: "abc".to_string(),
            seq: 1
        }]
    );
    assert_eq!(state.status(), Status::Loading);
    assert!(state.is_logged_in());
}

#[test]
fn test_missing_stored_session_does_nothing() {
    let mut state = AppState::new();
    let effects = state.update(Event::SessionRestored(None));
    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}

#[test]
fn test_empty_stored_session_is_left_in_place() {
    let mut state = AppState::new();
    let effects = state.update(Event::SessionRestored(Some(String::new())));
    assert!(effects.is_empty());
    assert_eq!(state, AppState::new());
}

#[test]
fn test_exchange_success_persists_then_fetches() {
    let mut state = AppState::new();
    let effects = state.update(Event::CallbackReceived {
        code: "c".to_string(),
        state: "s".to_string(),
    });
    assert_eq!(state.status(), Status::Authenticating);
    assert_eq!(
        effects,
        vec![Effect::Exchange {
            code: "c".to_string(),
            state: "s".to_string()
        }]
    );

    let effects = state.update(Event::ExchangeFinished(Ok(session("tok"))));
    assert_eq!(
        effects,
        vec![
            Effect::PersistSession(session("tok")),
            Effect::FetchTracks {
                access_token: "tok".to_string(),
                seq: 1
            },
        ]
    );
    assert_eq!(state.session(), Some(&session("tok")));
}

#[test]
fn test_exchange_failure_sets_error_and_returns_to_idle() {
    let mut state = AppState::new();
    state.update(Event::CallbackReceived {
        code: "c".to_string(),
        state: "s".to_string(),
    });
    let effects = state.update(Event::ExchangeFinished(Err("invalid_grant".to_string())));

    assert!(effects.is_empty());
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(state.error(), Some("invalid_grant"));
    assert!(state.session().is_none());
}

#[test]
fn test_exchange_failure_without_detail_uses_fallback() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Err(String::new())));
    assert_eq!(state.error(), Some(EXCHANGE_FAILED_FALLBACK));
}

#[test]
fn test_whitespace_detail_is_shown_verbatim() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Err("  ".to_string())));
    assert_eq!(state.error(), Some("  "));

    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));
    state.update(Event::TracksFetched {
        seq: 1,
        result: Err(" ".to_string()),
    });
    assert_eq!(state.error(), Some(" "));
}

#[test]
fn test_new_operation_clears_previous_error() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Err("boom".to_string())));
    state.update(Event::CallbackReceived {
        code: "c".to_string(),
        state: "s".to_string(),
    });
    assert!(state.error().is_none());
}

#[test]
fn test_fetch_result_replaces_tracks() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));

    state.update(Event::TracksFetched {
        seq: 1,
        result: Ok(vec![track("1", "Song A"), track("2", "Song B")]),
    });
    assert_eq!(state.tracks().len(), 2);
    assert_eq!(state.status(), Status::Idle);

    state.update(Event::RefreshRequested);
    state.update(Event::TracksFetched {
        seq: 2,
        result: Ok(vec![track("3", "Song C")]),
    });
    assert_eq!(state.tracks(), &[track("3", "Song C")]);
}

#[test]
fn test_fetch_failure_keeps_tracks_and_sets_error() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));
    state.update(Event::TracksFetched {
        seq: 1,
        result: Ok(vec![track("1", "Song A")]),
    });

    state.update(Event::RefreshRequested);
    state.update(Event::TracksFetched {
        seq: 2,
        result: Err(String::new()),
    });

    assert_eq!(state.error(), Some(FETCH_FAILED_FALLBACK));
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(state.tracks().len(), 1);
}

#[test]
fn test_fetch_without_token_is_noop() {
    let mut state = AppState::new();
    assert!(state.update(Event::FetchRequested).is_empty());
    assert!(state.update(Event::RefreshRequested).is_empty());
    assert_eq!(state.status(), Status::Idle);
}

#[test]
fn test_refresh_ignored_while_busy() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));
    assert_eq!(state.status(), Status::Loading);

    let effects = state.update(Event::RefreshRequested);
    assert!(effects.is_empty());
    assert_eq!(state.fetch_seq(), 1);
}

#[test]
fn test_stale_fetch_response_is_discarded() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));
    // a second automatic fetch overlaps the first one
    state.update(Event::FetchRequested);
    assert_eq!(state.fetch_seq(), 2);

    state.update(Event::TracksFetched {
        seq: 2,
        result: Ok(vec![track("new", "Newer")]),
    });
    state.update(Event::TracksFetched {
        seq: 1,
        result: Ok(vec![track("old", "Older")]),
    });

    assert_eq!(state.tracks(), &[track("new", "Newer")]);
    assert_eq!(state.status(), Status::Idle);
}

#[test]
fn test_logout_clears_session_and_tracks() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));
    state.update(Event::TracksFetched {
        seq: 1,
        result: Ok(vec![track("1", "Song A")]),
    });

    let effects = state.update(Event::LogoutRequested);
    assert_eq!(effects, vec![Effect::ClearStoredSession]);
    assert!(state.session().is_none());
    assert!(state.tracks().is_empty());
}

#[test]
fn test_logout_is_idempotent() {
    let mut state = AppState::new();
    state.update(Event::LogoutRequested);
    let after_first = state.clone();
    state.update(Event::LogoutRequested);

    assert_eq!(state, after_first);
    assert!(state.session().is_none());
    assert!(state.tracks().is_empty());
    assert!(state.error().is_none());
}

#[test]
fn test_logout_during_fetch_drops_response() {
    let mut state = AppState::new();
    state.update(Event::ExchangeFinished(Ok(session("tok"))));
    state.update(Event::LogoutRequested);
    assert_eq!(state.status(), Status::Idle);

    state.update(Event::TracksFetched {
        seq: 1,
        result: Ok(vec![track("1", "Song A")]),
    });
    assert!(state.tracks().is_empty());
}
