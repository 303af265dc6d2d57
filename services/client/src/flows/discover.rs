//! services/client/src/flows/discover.rs
//!
//! The suggestion feed (like / pass) and the inbox of incoming match requests.

use crate::app::App;
use crate::error::ClientError;
use crate::flows::guard::ActionGuard;
use pairpad_core::domain::{LikeOutcome, Match, MatchRequest, RecordId, RequestResponse, User};
use pairpad_core::scoring::{resolve_score, CompatibilityScore};
use tracing::{error, info, warn};

//=========================================================================================
// Discover feed
//=========================================================================================

/// Like and pass on suggested users. Each target allows one action at a time;
/// different targets may be acted on concurrently.
#[derive(Debug, Clone, Default)]
pub struct DiscoverFeed {
    guard: ActionGuard,
}

impl DiscoverFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, user_id: RecordId) -> bool {
        self.guard.is_busy(user_id)
    }

    pub async fn load(&self, app: &App) -> Result<Vec<User>, ClientError> {
        match app.backend.matching.suggestions().await {
            Ok(users) => {
                app.state.lock().await.matches.set_suggested(users.clone());
                Ok(users)
            }
            Err(e) => {
                error!("Failed to load suggestions: {}", e);
                app.notifier.error("Failed to load match suggestions");
                Err(e.into())
            }
        }
    }

    /// Likes a suggested user. A mutual like refreshes the cached match list.
    pub async fn like(&self, app: &App, user_id: RecordId) -> Result<LikeOutcome, ClientError> {
        let _in_flight = self
            .guard
            .try_begin(user_id)
            .ok_or_else(|| ClientError::Busy(format!("user {}", user_id)))?;
        let name = suggested_name(app, user_id).await;

        match app.backend.matching.accept(user_id).await {
            Ok(outcome) => {
                app.state.lock().await.matches.remove_suggested(user_id);
                if outcome.is_mutual() {
                    app.notifier.success(&format!(
                        "It's a match with {}! You can now start chatting.",
                        name
                    ));
                    refresh_matches(app).await;
                } else {
                    app.notifier.success(&format!("You liked {}!", name));
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("Failed to accept match: {}", e);
                app.notifier.error("Failed to like this user");
                Err(e.into())
            }
        }
    }

    pub async fn pass(&self, app: &App, user_id: RecordId) -> Result<(), ClientError> {
        let _in_flight = self
            .guard
            .try_begin(user_id)
            .ok_or_else(|| ClientError::Busy(format!("user {}", user_id)))?;
        let name = suggested_name(app, user_id).await;

        match app.backend.matching.reject(user_id).await {
            Ok(()) => {
                app.state.lock().await.matches.remove_suggested(user_id);
                app.notifier.success(&format!("Passed on {}", name));
                Ok(())
            }
            Err(e) => {
                error!("Failed to reject match: {}", e);
                app.notifier.error("Failed to pass on this user");
                Err(e.into())
            }
        }
    }

    /// Sends a match request to a user found outside the feed, such as a space owner.
    pub async fn request_match(
        &self,
        app: &App,
        user_id: RecordId,
    ) -> Result<LikeOutcome, ClientError> {
        let _in_flight = self
            .guard
            .try_begin(user_id)
            .ok_or_else(|| ClientError::Busy(format!("user {}", user_id)))?;

        match app.backend.matching.request_match(user_id).await {
            Ok(outcome) => {
                app.notifier.success("Match request sent!");
                Ok(outcome)
            }
            Err(e) => {
                error!("Failed to request match: {}", e);
                app.notifier.error("Failed to send match request");
                Err(e.into())
            }
        }
    }
}

/// The score to show next to `other`: the backend's when it sent one, otherwise
/// the local Big-Five fallback.
pub async fn score_for(app: &App, other: &User) -> Option<CompatibilityScore> {
    let mine = app
        .state
        .lock()
        .await
        .auth
        .user
        .as_ref()
        .and_then(|me| me.personality_profile.as_ref())
        .map(|profile| profile.traits());
    let theirs = other.personality_profile.as_ref().map(|p| p.traits());
    resolve_score(
        other.compatibility_score,
        other.score_breakdown,
        mine.as_ref(),
        theirs.as_ref(),
    )
}

pub async fn load_matches(app: &App) -> Result<Vec<Match>, ClientError> {
    match app.backend.matching.matches().await {
        Ok(matches) => {
            app.state.lock().await.matches.set_matches(matches.clone());
            Ok(matches)
        }
        Err(e) => {
            error!("Failed to load matches: {}", e);
            app.notifier.error(&e.user_message("Failed to load matches"));
            Err(e.into())
        }
    }
}

async fn refresh_matches(app: &App) {
    match app.backend.matching.matches().await {
        Ok(matches) => app.state.lock().await.matches.set_matches(matches),
        Err(e) => warn!("Could not refresh matches: {}", e),
    }
}

async fn suggested_name(app: &App, user_id: RecordId) -> String {
    app.state
        .lock()
        .await
        .matches
        .suggested
        .iter()
        .find(|u| u.id == user_id)
        .map(|u| u.username.clone())
        .unwrap_or_else(|| "this user".to_string())
}

//=========================================================================================
// Requests inbox
//=========================================================================================

#[derive(Debug, Clone, Default)]
pub struct RequestsInbox {
    pub requests: Vec<MatchRequest>,
}

impl RequestsInbox {
    pub async fn load(app: &App) -> Result<Self, ClientError> {
        match app.backend.matching.requests().await {
            Ok(requests) => Ok(Self { requests }),
            Err(e) => {
                error!("Failed to load match requests: {}", e);
                app.notifier
                    .error(&e.user_message("Failed to load match requests"));
                Err(e.into())
            }
        }
    }

    /// Answers the request from `requester_id`. Answered requests leave the inbox.
    pub async fn respond(
        &mut self,
        app: &App,
        requester_id: RecordId,
        response: RequestResponse,
    ) -> Result<LikeOutcome, ClientError> {
        match app
            .backend
            .matching
            .respond_to_request(requester_id, response)
            .await
        {
            Ok(outcome) => {
                self.requests
                    .retain(|request| request.requesting_user.id != requester_id);
                info!("Answered the request from user {}", requester_id);
                if response == RequestResponse::Accept {
                    app.notifier
                        .success("Match created! You can now start messaging.");
                    refresh_matches(app).await;
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("Failed to respond to match request: {}", e);
                app.notifier.error("Failed to respond to match request");
                Err(e.into())
            }
        }
    }
}
