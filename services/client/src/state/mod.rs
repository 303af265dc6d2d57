//! services/client/src/state/mod.rs
//!
//! The application-state container.
//!
//! Stores are plain structs owned by `AppState`, which flows receive explicitly.
//! Only the auth and onboarding stores survive a restart; they are written through
//! `StateStorage` as named JSON snapshots.

pub mod auth;
pub mod matches;
pub mod personality;
pub mod storage;

pub use auth::AuthStore;
pub use matches::{MatchStore, MessageStore};
pub use personality::{AssessmentDraft, OnboardingStore, PersonalityStore};
pub use storage::{JsonFileStorage, MemoryStorage};

use pairpad_core::domain::{OnboardingProgress, User};
use pairpad_core::ports::{PortError, PortResult, StateStorage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

pub const AUTH_KEY: &str = "auth-storage";
pub const ONBOARDING_KEY: &str = "onboarding-storage";

/// `AppState` shared between the flows of one process.
pub type SharedState = Arc<Mutex<AppState>>;

#[derive(Debug, Serialize, Deserialize)]
struct AuthSnapshot {
    user: Option<User>,
    is_authenticated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OnboardingSnapshot {
    progress: Option<OnboardingProgress>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthStore,
    pub matches: MatchStore,
    pub messages: MessageStore,
    pub personality: PersonalityStore,
    pub onboarding: OnboardingStore,
}

impl AppState {
    pub fn shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    /// Writes the persisted slices. Later writes replace earlier ones.
    pub fn persist(&self, storage: &dyn StateStorage) -> PortResult<()> {
        let auth = AuthSnapshot {
            user: self.auth.user.clone(),
            is_authenticated: self.auth.is_authenticated,
        };
        let onboarding = OnboardingSnapshot {
            progress: self.onboarding.progress.clone(),
        };
        storage.save(AUTH_KEY, &to_value(&auth)?)?;
        storage.save(ONBOARDING_KEY, &to_value(&onboarding)?)
    }

    /// Rebuilds state from the persisted slices. Missing or unreadable slices
    /// start empty.
    pub fn restore(storage: &dyn StateStorage) -> PortResult<Self> {
        let mut state = Self::default();
        if let Some(auth) = load::<AuthSnapshot>(storage, AUTH_KEY)? {
            state.auth.user = auth.user;
            state.auth.is_authenticated = auth.is_authenticated && state.auth.user.is_some();
        }
        if let Some(onboarding) = load::<OnboardingSnapshot>(storage, ONBOARDING_KEY)? {
            state.onboarding.progress = onboarding.progress;
        }
        Ok(state)
    }

    /// Signs out and forgets everything tied to the previous user.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn to_value<T: Serialize>(value: &T) -> PortResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| PortError::Unexpected(e.to_string()))
}

fn load<T: DeserializeOwned>(storage: &dyn StateStorage, key: &str) -> PortResult<Option<T>> {
    let Some(value) = storage.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(e) => {
            warn!("Discarding snapshot '{}': {}", key, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairpad_core::domain::{RecordId, Role, VerificationStatus};

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "ana@example.com",
            "username": "ana",
            "role": "student"
        }))
        .unwrap()
    }

    #[test]
    fn persist_then_restore_keeps_only_the_persisted_slices() {
        let storage = MemoryStorage::new();
        let mut state = AppState::default();
        state.auth.login(user());
        state.auth.set_loading(true);
        state.matches.set_suggested(vec![user()]);
        state.persist(&storage).unwrap();

        let restored = AppState::restore(&storage).unwrap();
        assert!(restored.auth.is_authenticated);
        assert!(!restored.auth.is_loading);
        let restored_user = restored.auth.user.unwrap();
        assert_eq!(restored_user.id, RecordId(7));
        assert_eq!(restored_user.role, Role::Student);
        assert_eq!(restored_user.verification_status, VerificationStatus::default());
        assert!(restored.matches.suggested.is_empty());
    }

    #[test]
    fn restore_from_empty_storage_is_signed_out() {
        let restored = AppState::restore(&MemoryStorage::new()).unwrap();
        assert_eq!(restored, AppState::default());
    }

    #[test]
    fn malformed_snapshot_is_discarded() {
        let storage = MemoryStorage::new();
        storage
            .save(AUTH_KEY, &serde_json::json!({"user": 12, "is_authenticated": "yes"}))
            .unwrap();
        let restored = AppState::restore(&storage).unwrap();
        assert!(!restored.auth.is_authenticated);
    }
}
