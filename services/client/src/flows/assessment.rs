//! services/client/src/flows/assessment.rs
//!
//! The three-step personality assessment.

use crate::app::App;
use crate::error::ClientError;
use crate::flows::Route;
use crate::state::AssessmentDraft;
use pairpad_core::domain::{ProfileUpdate, RecordId};
use pairpad_core::forms::assessment::{self, AssessmentForm};
use pairpad_core::wizard::MultiStepForm;
use tracing::{error, info, warn};

pub struct AssessmentFlow {
    form: MultiStepForm<AssessmentForm>,
}

impl AssessmentFlow {
    /// Loads the backend's questions, falling back to the built-in bank when the
    /// backend has none or cannot be reached, then restores any saved answers.
    pub async fn start(app: &App) -> Result<Self, ClientError> {
        let questions = match app.backend.personality.assessment_questions().await {
            Ok(questions) => questions,
            Err(e) => {
                warn!("Using the built-in questions: {}", e);
                Vec::new()
            }
        };
        let mut form = assessment::wizard(questions)?;

        let draft = app.state.lock().await.personality.draft.clone();
        form.edit("responses", |data| {
            let known: Vec<RecordId> = data.questions.iter().map(|q| q.id).collect();
            for (question, value) in draft.answers {
                if known.contains(&question) {
                    data.answer(question, value);
                }
            }
            if draft.communication_style.is_some() {
                data.communication_style = draft.communication_style;
            }
        });

        Ok(Self { form })
    }

    pub fn form(&self) -> &MultiStepForm<AssessmentForm> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MultiStepForm<AssessmentForm> {
        &mut self.form
    }

    /// Records one 1-5 answer and keeps it in the draft store.
    pub async fn answer(&mut self, app: &App, question: RecordId, value: u8) {
        self.form.edit("responses", |data| data.answer(question, value));
        app.state.lock().await.personality.update(AssessmentDraft {
            answers: [(question, value)].into_iter().collect(),
            ..Default::default()
        });
    }

    /// Submits from the final step. On success the profile is cached on the user.
    pub async fn submit(&mut self, app: &App) -> Result<Route, ClientError> {
        let submission = self.form.begin_submit()?.submission();

        match app.backend.personality.submit_assessment(&submission).await {
            Ok(profile) => {
                self.form.complete();
                info!("Assessment submitted");
                {
                    let mut state = app.state.lock().await;
                    state.personality.complete(profile.clone());
                    state.auth.update_user(&ProfileUpdate {
                        personality_profile: Some(profile),
                        ..Default::default()
                    });
                }
                app.persist().await;
                app.notifier.success("Your personality profile is ready!");
                Ok(Route::Dashboard)
            }
            Err(e) => {
                error!("Failed to submit assessment: {}", e);
                let message = e.user_message("Failed to submit assessment");
                self.form.fail_submit(message.clone());
                app.notifier.error(&message);
                Err(e.into())
            }
        }
    }
}
