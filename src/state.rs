use std::sync::Arc;

use crate::domain::session::BackendSession;
use crate::infrastructure::api::{ApiClient, HttpLeadsApi};

/// State shared by all web handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client without a session; handlers derive per-visitor clients from it.
    pub api: ApiClient,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(api: ApiClient, cookie_secure: bool) -> Self {
        Self { api, cookie_secure }
    }

    /// Leads API that speaks for the visitor holding `session`.
    pub fn leads_api(&self, session: Option<BackendSession>) -> Arc<HttpLeadsApi> {
        Arc::new(HttpLeadsApi::new(self.api.with_session(session)))
    }
}
