use crate::{app::Location, config::Config, error, info, success, types::TrackQuery};

use super::Context;

/// Completes a login from the URL the browser landed on.
pub async fn callback(config: Config, query: TrackQuery, landing_url: String) {
    let ctx = Context::new(config);
    let mut location = match Location::parse(&landing_url) {
        Ok(location) => location,
        Err(e) => error!("{}", e),
    };

    if location.callback_params().complete().is_none() {
        info!("No complete code/state pair in the URL, nothing to exchange.");
    }

    let mut controller = ctx.controller(query);
    controller.load_page(&mut location).await;
    info!("Page location is now {}", location);

    ctx.print(&controller);
    if controller.state().is_logged_in() && controller.state().error().is_none() {
        success!("Signed in.");
    }
}
