use axum::{Extension, http::Uri, response::Html};

use crate::server::LandingSlot;

/// Origin prepended to the request target to rebuild the landing URL.
#[derive(Debug, Clone)]
pub struct PageOrigin(pub String);

pub async fn callback(
    uri: Uri,
    Extension(PageOrigin(origin)): Extension<PageOrigin>,
    Extension(landing): Extension<LandingSlot>,
) -> Html<&'static str> {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let mut slot = landing.lock().await;
    if slot.is_some() {
        return Html("<h4>Login already received.</h4><p>Return to your terminal.</p>");
    }
    *slot = Some(format!("{origin}{target}"));

    Html("<h2>Login received.</h2><p>Return to your terminal, you can close this window.</p>")
}
