//! services/client/src/app.rs
//!
//! Wires together everything a flow runs against: the backend ports, the
//! application state, its storage, and the notifier.

use crate::adapters::{
    FileTokenStore, RestAuthAdapter, RestClient, RestColivingAdapter, RestDashboardAdapter,
    RestMatchingAdapter, RestMessagingAdapter, RestPersonalityAdapter,
};
use crate::config::Config;
use crate::error::ClientError;
use crate::flows::notify::Notifier;
use crate::state::{AppState, JsonFileStorage, SharedState};
use pairpad_core::domain::User;
use pairpad_core::ports::{
    AuthService, ColivingService, MatchingService, MessagingService, PersonalityService,
    SharedDashboardService, StateStorage, TokenStore,
};
use std::sync::Arc;
use tracing::warn;

//=========================================================================================
// Backend (the ports)
//=========================================================================================

/// One handle per backend port, plus the token store they share.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthService>,
    pub personality: Arc<dyn PersonalityService>,
    pub matching: Arc<dyn MatchingService>,
    pub messaging: Arc<dyn MessagingService>,
    pub coliving: Arc<dyn ColivingService>,
    pub dashboard: Arc<dyn SharedDashboardService>,
    pub tokens: Arc<dyn TokenStore>,
}

impl Backend {
    /// Builds every REST adapter over one client bound to `api_url`.
    pub fn rest(api_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        let rest = RestClient::new(api_url, tokens.clone());
        Self {
            auth: Arc::new(RestAuthAdapter::new(rest.clone())),
            personality: Arc::new(RestPersonalityAdapter::new(rest.clone())),
            matching: Arc::new(RestMatchingAdapter::new(rest.clone())),
            messaging: Arc::new(RestMessagingAdapter::new(rest.clone())),
            coliving: Arc::new(RestColivingAdapter::new(rest.clone())),
            dashboard: Arc::new(RestDashboardAdapter::new(rest)),
            tokens,
        }
    }
}

//=========================================================================================
// App
//=========================================================================================

/// The context handed to every flow.
#[derive(Clone)]
pub struct App {
    pub backend: Backend,
    pub state: SharedState,
    pub storage: Arc<dyn StateStorage>,
    pub notifier: Arc<dyn Notifier>,
}

impl App {
    /// Creates the app, restoring whatever state `storage` holds.
    pub fn new(
        backend: Backend,
        storage: Arc<dyn StateStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let state = AppState::restore(storage.as_ref())?;
        Ok(Self {
            backend,
            state: state.shared(),
            storage,
            notifier,
        })
    }

    /// Creates the app the binary runs: REST adapters, a file-backed token and
    /// file-backed snapshots under the configured state directory.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self, ClientError> {
        let tokens = Arc::new(FileTokenStore::new(config.token_path(), config.token_ttl));
        let backend = Backend::rest(&config.api_url, tokens);
        let storage = Arc::new(JsonFileStorage::new(config.state_dir.clone()));
        Self::new(backend, storage, notifier)
    }

    /// Writes the persisted slices of state. A failure is logged, not returned.
    pub async fn persist(&self) {
        let state = self.state.lock().await;
        if let Err(e) = state.persist(self.storage.as_ref()) {
            warn!("Failed to persist application state: {}", e);
        }
    }

    /// The signed-in user, or `NotLoggedIn`.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let state = self.state.lock().await;
        match (&state.auth.user, state.auth.is_authenticated) {
            (Some(user), true) => Ok(user.clone()),
            _ => Err(ClientError::NotLoggedIn),
        }
    }
}
