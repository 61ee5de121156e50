use crate::{config::Config, success, types::TrackQuery};

use super::Context;

pub async fn logout(config: Config) {
    let ctx = Context::new(config);
    let mut controller = ctx.controller(TrackQuery::default());
    controller.logout().await;
    success!("Signed out.");
}
