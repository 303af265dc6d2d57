//! services/client/src/state/auth.rs
//!
//! The signed-in user and whether the session is live.

use pairpad_core::domain::{ProfileUpdate, User};
use pairpad_core::ports::{AuthService, TokenStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthStore {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// Transient; never persisted.
    #[serde(skip)]
    pub is_loading: bool,
}

impl AuthStore {
    pub fn login(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.is_loading = false;
    }

    /// Merges a partial update into the cached user. Does nothing when signed out.
    pub fn update_user(&mut self, update: &ProfileUpdate) {
        if let Some(user) = self.user.as_mut() {
            update.apply_to(user);
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Re-validates the session against the backend.
    ///
    /// Without a token the store is signed out. With one, the profile is fetched; a
    /// failure clears the token and signs out. Returns whether the user is signed in.
    pub async fn check_auth(&mut self, tokens: &dyn TokenStore, auth: &dyn AuthService) -> bool {
        if tokens.get().is_none() {
            self.logout();
            return false;
        }

        self.set_loading(true);
        match auth.profile().await {
            Ok(user) => {
                info!("Session restored for {}", user.username);
                self.login(user);
                true
            }
            Err(e) => {
                warn!("Stored session is no longer valid: {}", e);
                if let Err(e) = tokens.clear() {
                    warn!("Failed to clear the stored token: {}", e);
                }
                self.logout();
                false
            }
        }
    }
}
