//! services/client/src/adapters/personality.rs
//!
//! This module contains the adapter for the assessment endpoints.
//! It implements the `PersonalityService` port from the `core` crate.

use crate::adapters::http::RestClient;
use async_trait::async_trait;
use pairpad_core::coliving::Listing;
use pairpad_core::domain::PersonalityProfile;
use pairpad_core::forms::assessment::{AssessmentQuestion, AssessmentSubmission};
use pairpad_core::ports::{PersonalityService, PortResult};
use serde::Deserialize;

/// The submit endpoint wraps the profile; older deployments answer with it bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum SubmitResponse {
    Wrapped { profile: PersonalityProfile },
    Bare(PersonalityProfile),
}

/// An adapter that implements the `PersonalityService` port over the REST API.
#[derive(Clone)]
pub struct RestPersonalityAdapter {
    rest: RestClient,
}

impl RestPersonalityAdapter {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl PersonalityService for RestPersonalityAdapter {
    async fn assessment_questions(&self) -> PortResult<Vec<AssessmentQuestion>> {
        let questions: Listing<AssessmentQuestion> =
            self.rest.get("/personality/assessment/").await?;
        Ok(questions.into_vec())
    }

    async fn submit_assessment(
        &self,
        submission: &AssessmentSubmission,
    ) -> PortResult<PersonalityProfile> {
        let response: SubmitResponse = self.rest.post("/personality/submit/", submission).await?;
        Ok(match response {
            SubmitResponse::Wrapped { profile } => profile,
            SubmitResponse::Bare(profile) => profile,
        })
    }
}
