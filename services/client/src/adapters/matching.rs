//! services/client/src/adapters/matching.rs
//!
//! This module contains the adapter for the matching endpoints.
//! It implements the `MatchingService` port from the `core` crate.

use crate::adapters::http::RestClient;
use async_trait::async_trait;
use pairpad_core::coliving::Listing;
use pairpad_core::domain::{
    CompatibilityReport, LikeOutcome, Match, MatchRequest, RecordId, RequestResponse, User,
};
use pairpad_core::ports::{MatchingService, PortResult};
use serde::Serialize;

#[derive(Serialize)]
struct TargetUser {
    user_id: RecordId,
}

#[derive(Serialize)]
struct RequestAnswer {
    user_id: RecordId,
    response: RequestResponse,
}

/// An adapter that implements the `MatchingService` port over the REST API.
#[derive(Clone)]
pub struct RestMatchingAdapter {
    rest: RestClient,
}

impl RestMatchingAdapter {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl MatchingService for RestMatchingAdapter {
    async fn suggestions(&self) -> PortResult<Vec<User>> {
        let users: Listing<User> = self.rest.get("/matching/suggestions/").await?;
        Ok(users.into_vec())
    }

    async fn matches(&self) -> PortResult<Vec<Match>> {
        let matches: Listing<Match> = self.rest.get("/matching/matches/").await?;
        Ok(matches.into_vec())
    }

    async fn requests(&self) -> PortResult<Vec<MatchRequest>> {
        let requests: Listing<MatchRequest> = self.rest.get("/matching/requests/").await?;
        Ok(requests.into_vec())
    }

    async fn accept(&self, user_id: RecordId) -> PortResult<LikeOutcome> {
        self.rest
            .post("/matching/accept/", &TargetUser { user_id })
            .await
    }

    async fn reject(&self, user_id: RecordId) -> PortResult<()> {
        self.rest
            .post_unit("/matching/reject/", &TargetUser { user_id })
            .await
    }

    async fn respond_to_request(
        &self,
        requester_id: RecordId,
        response: RequestResponse,
    ) -> PortResult<LikeOutcome> {
        self.rest
            .post(
                "/matching/requests/respond/",
                &RequestAnswer {
                    user_id: requester_id,
                    response,
                },
            )
            .await
    }

    async fn request_match(&self, user_id: RecordId) -> PortResult<LikeOutcome> {
        self.rest
            .post("/matching/request/", &TargetUser { user_id })
            .await
    }

    async fn compatibility_with(&self, user_id: RecordId) -> PortResult<CompatibilityReport> {
        self.rest
            .get(&format!("/matching/compatibility/{}/", user_id))
            .await
    }
}
