use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{
    app::Location,
    config::Config,
    error, info,
    server::{self, LandingSlot},
    success,
    types::TrackQuery,
    warning,
};

use super::{Context, PageController};

pub async fn login(config: Config, query: TrackQuery) {
    let ctx = Context::new(config);
    let mut controller = ctx.controller(query);
    sign_in(&ctx, &mut controller).await;
    ctx.print(&controller);
}

/// Runs the browser round trip and loads the landing page into
/// `controller`.
pub(crate) async fn sign_in(ctx: &Context, controller: &mut PageController) {
    let mut location = match wait_for_landing(ctx).await {
        Some(location) => location,
        None => error!("Login failed or timed out."),
    };

    controller.load_page(&mut location).await;

    match controller.state().error() {
        Some(e) => warning!("Login did not complete: {}", e),
        None if controller.state().is_logged_in() => success!("Authentication successful!"),
        None => warning!("The backend answered without an access token."),
    }
}

async fn wait_for_landing(ctx: &Context) -> Option<Location> {
    let landing: LandingSlot = Arc::new(Mutex::new(None));

    let listener = match server::bind(&ctx.config.server_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot start callback server. Err: {}", e),
    };

    let server_state = Arc::clone(&landing);
    let origin = ctx.config.page_origin();
    let server = tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_state, origin).await {
            warning!("Callback server stopped. Err: {}", e);
        }
    });

    let login_url = ctx.login_url();
    info!("Opening {}", login_url);
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let landed = poll_landing(&landing, ctx.config.login_timeout).await;
    server.abort();

    match Location::parse(&landed?) {
        Ok(location) => Some(location),
        Err(e) => {
            warning!("{}", e);
            None
        }
    }
}

async fn poll_landing(landing: &LandingSlot, max_wait: Duration) -> Option<String> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Some(url) = landing.lock().await.take() {
            return Some(url);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
