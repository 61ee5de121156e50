use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api};

/// Landing URL recorded by the callback route.
pub type LandingSlot = Arc<Mutex<Option<String>>>;

pub fn router(landing: LandingSlot, origin: String) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(landing))
        .layer(Extension(api::PageOrigin(origin)))
}

/// Binds the landing server. Binding happens before returning so a port
/// conflict surfaces before the browser is opened.
pub async fn bind(addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {addr:?}: {e}"))?;
    let listener = TcpListener::bind(&addr).await?;
    Ok(listener)
}

pub async fn start_api_server(listener: TcpListener, landing: LandingSlot, origin: String) -> Res<()> {
    axum::serve(listener, router(landing, origin)).await?;
    Ok(())
}
