//! # CLI Module
//!
//! User-facing commands. Each command behaves like one load of the page:
//! it builds a [`Controller`] over the backend client and the file store,
//! runs the page-load sequence (restore session, complete a pending
//! authorization, fetch tracks) and prints the resulting [`Page`].
//!
//! ## Commands
//!
//! - [`login`] - opens the backend login link and waits for the browser to
//!   land on the local callback server
//! - [`callback`] - completes a login from a pasted landing URL
//! - [`show`] - prints the page with freshly fetched top tracks
//! - [`session`] - interactive page with `refresh`, `logout` and `login`
//! - [`logout`] - forgets the stored session
//!
//! [`Page`]: crate::view::Page

mod callback;
mod login;
mod logout;
mod session;
mod show;

pub use callback::callback;
pub use login::login;
pub use logout::logout;
pub use session::session;
pub use show::show;

use crate::{
    app::{Controller, Location},
    backend::ApiClient,
    config::Config,
    error,
    management::FileStore,
    types::TrackQuery,
    view::Page,
};

pub(crate) type PageController = Controller<ApiClient, FileStore>;

pub(crate) struct Context {
    pub config: Config,
    pub client: ApiClient,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let client = match ApiClient::new(&config.api_base_url, &config.page_origin()) {
            Ok(client) => client,
            Err(e) => error!("Cannot create HTTP client. Err: {}", e),
        };
        Self { config, client }
    }

    pub fn controller(&self, query: TrackQuery) -> PageController {
        Controller::new(self.client.clone(), FileStore::default_location())
            .with_query(query)
            .with_redirect_uri(self.config.spotify_redirect_uri.clone())
            .with_progress(true)
    }

    pub fn login_url(&self) -> String {
        self.client.build_login_url(
            &self.config.spotify_redirect_uri,
            &self.config.frontend_redirect_uri,
        )
    }

    /// The page as it looks without any callback parameters.
    pub fn home(&self) -> Location {
        match Location::parse(&format!("{}/", self.config.page_origin())) {
            Ok(location) => location,
            Err(e) => error!("{}", e),
        }
    }

    pub fn print(&self, controller: &PageController) {
        println!("{}", Page::build(controller.state(), &self.login_url()));
    }
}
