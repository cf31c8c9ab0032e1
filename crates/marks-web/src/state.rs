//! Shared application state handed to every handler.

use std::sync::Arc;

use marks_auth::Authenticator;
use marks_config::{MarksConfig, SessionConfig};
use marks_db::service::MarksService;

use crate::pages::Pages;

/// Cheap to clone: everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MarksService>,
    pub auth: Arc<Authenticator>,
    pub pages: Arc<Pages>,
    pub session: Arc<SessionConfig>,
}

impl AppState {
    /// Wire state around an open service. The session store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the page templates fail to register.
    pub fn new(service: Arc<MarksService>, session: SessionConfig) -> anyhow::Result<Self> {
        let auth = Arc::new(Authenticator::new(Arc::clone(&service)));
        let pages = Arc::new(Pages::new()?);
        Ok(Self {
            service,
            auth,
            pages,
            session: Arc::new(session),
        })
    }

    /// Open the configured database and wire state around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn from_config(config: &MarksConfig) -> anyhow::Result<Self> {
        let service = MarksService::new_local(&config.database.path).await?;
        Self::new(Arc::new(service), config.session.clone())
    }
}
