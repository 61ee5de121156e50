use crate::{config::Config, types::TrackQuery};

use super::Context;

pub async fn show(config: Config, query: TrackQuery) {
    let ctx = Context::new(config);
    let mut controller = ctx.controller(query);
    let mut location = ctx.home();

    controller.load_page(&mut location).await;
    ctx.print(&controller);
}
