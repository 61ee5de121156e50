use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use toptracks::{
    app::Location,
    server::{self, LandingSlot},
};

async fn spawn_landing_server() -> (String, LandingSlot) {
    let listener = server::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    let landing: LandingSlot = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&landing);
    let server_origin = origin.clone();
    tokio::spawn(async move {
        server::start_api_server(listener, slot, server_origin)
            .await
            .unwrap();
    });

    (origin, landing)
}

#[tokio::test]
async fn test_callback_records_landing_url() {
    let (origin, landing) = spawn_landing_server().await;

    let body = reqwest::get(format!("{origin}/callback?code=abc&state=xyz"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Login received"));

    let recorded = landing.lock().await.clone().expect("landing recorded");
    assert_eq!(recorded, format!("{origin}/callback?code=abc&state=xyz"));

    let location = Location::parse(&recorded).unwrap();
    assert_eq!(location.callback_params().complete(), Some(("abc", "xyz")));
}

#[tokio::test]
async fn test_first_landing_wins() {
    let (origin, landing) = spawn_landing_server().await;

    reqwest::get(format!("{origin}/callback?code=first&state=s"))
        .await
        .unwrap();
    let body = reqwest::get(format!("{origin}/callback?code=second&state=s"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("already received"));
    let recorded = landing.lock().await.clone().unwrap();
    assert!(recorded.contains("code=first"));
}

#[tokio::test]
async fn test_health() {
    let (origin, _) = spawn_landing_server().await;

    let health: Value = reqwest::get(format!("{origin}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}
