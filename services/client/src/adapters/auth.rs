//! services/client/src/adapters/auth.rs
//!
//! This module contains the adapter for the backend's authentication endpoints.
//! It implements the `AuthService` port from the `core` crate.

use crate::adapters::http::RestClient;
use async_trait::async_trait;
use pairpad_core::domain::{
    AuthSession, OnboardingProgress, ProfileUpdate, RecordId, Registration, User,
};
use pairpad_core::ports::{AuthService, PortResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    user: User,
    access: String,
}

#[derive(Deserialize)]
struct TokenPair {
    access: String,
}

#[derive(Deserialize)]
struct RegisterResponse {
    user: User,
    tokens: TokenPair,
}

#[derive(Serialize)]
struct OnboardingStepUpdate<'a> {
    step: &'a str,
    completed: bool,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AuthService` port over the REST API.
#[derive(Clone)]
pub struct RestAuthAdapter {
    rest: RestClient,
}

impl RestAuthAdapter {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

//=========================================================================================
// `AuthService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AuthService for RestAuthAdapter {
    async fn login(&self, email: &str, password: &str) -> PortResult<AuthSession> {
        let response: LoginResponse = self
            .rest
            .post("/auth/login/", &Credentials { email, password })
            .await?;
        self.rest.tokens().set(&response.access)?;
        info!("Logged in as {}", response.user.username);
        Ok(AuthSession {
            user: response.user,
            token: response.access,
        })
    }

    async fn register(&self, registration: &Registration) -> PortResult<AuthSession> {
        let response: RegisterResponse = self.rest.post("/auth/register/", registration).await?;
        self.rest.tokens().set(&response.tokens.access)?;
        info!("Registered account {}", response.user.username);
        Ok(AuthSession {
            user: response.user,
            token: response.tokens.access,
        })
    }

    async fn logout(&self) -> PortResult<()> {
        // 1. Forget the token locally first; this is what logs the user out.
        self.rest.tokens().clear()?;

        // 2. Tell the backend, ignoring whatever it answers.
        if let Err(e) = self
            .rest
            .post_unit("/auth/logout/", &serde_json::json!({}))
            .await
        {
            debug!("Ignoring logout error: {}", e);
        }
        Ok(())
    }

    async fn profile(&self) -> PortResult<User> {
        self.rest.get("/auth/profile/").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> PortResult<User> {
        self.rest.patch("/auth/profile/", update).await
    }

    async fn public_profile(&self, user_id: RecordId) -> PortResult<User> {
        self.rest.get(&format!("/auth/users/{}/", user_id)).await
    }

    async fn onboarding_progress(&self) -> PortResult<OnboardingProgress> {
        self.rest.get("/auth/onboarding/progress/").await
    }

    async fn update_onboarding_step(
        &self,
        step: &str,
        completed: bool,
    ) -> PortResult<OnboardingProgress> {
        self.rest
            .post(
                "/auth/onboarding/progress/update/",
                &OnboardingStepUpdate { step, completed },
            )
            .await
    }
}
