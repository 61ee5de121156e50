use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{config::Config, info, types::TrackQuery, warning};

use super::{Context, login::sign_in};

const HELP: &str = "Commands: refresh | logout | login | help | quit";

/// Keeps one page open and applies commands read from stdin.
pub async fn session(config: Config, query: TrackQuery) {
    let ctx = Context::new(config);
    let mut controller = ctx.controller(query);
    let mut location = ctx.home();

    controller.load_page(&mut location).await;
    ctx.print(&controller);
    info!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input. Err: {}", e);
                break;
            }
        };

        match line.trim() {
            "" => continue,
            "r" | "refresh" => {
                if !controller.state().is_logged_in() {
                    warning!("Log in first.");
                    continue;
                }
                controller.refresh().await;
            }
            "logout" | "sign-out" => controller.logout().await,
            "login" => {
                if controller.state().is_logged_in() {
                    info!("Already signed in. Use logout first to switch accounts.");
                    continue;
                }
                sign_in(&ctx, &mut controller).await;
            }
            "h" | "help" => {
                info!("{}", HELP);
                continue;
            }
            "q" | "quit" | "exit" => break,
            other => {
                warning!("Unknown command {:?}. {}", other, HELP);
                continue;
            }
        }

        ctx.print(&controller);
    }
}
