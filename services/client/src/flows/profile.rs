//! services/client/src/flows/profile.rs
//!
//! Profile editing. The four tabs can be saved from anywhere; saving checks every
//! tab and stops on the first one with errors.

use crate::app::App;
use crate::error::ClientError;
use chrono::NaiveDate;
use pairpad_core::domain::User;
use pairpad_core::forms::profile::{self, ProfileForm};
use pairpad_core::wizard::MultiStepForm;
use tracing::error;

pub struct ProfileFlow {
    form: MultiStepForm<ProfileForm>,
}

impl ProfileFlow {
    pub fn new(user: &User, today: NaiveDate) -> Result<Self, ClientError> {
        Ok(Self {
            form: profile::wizard(user, today)?,
        })
    }

    /// Pre-fills the form from the signed-in user.
    pub async fn for_current_user(app: &App, today: NaiveDate) -> Result<Self, ClientError> {
        let user = app.current_user().await?;
        Self::new(&user, today)
    }

    pub fn form(&self) -> &MultiStepForm<ProfileForm> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MultiStepForm<ProfileForm> {
        &mut self.form
    }

    /// Saves the whole profile. Invalid input never reaches the backend. After a
    /// save the form starts over from the backend's copy of the user.
    pub async fn save(&mut self, app: &App) -> Result<User, ClientError> {
        while !self.form.is_final_step() {
            if self.form.advance().is_err() {
                return Err(ClientError::Invalid(self.form.errors().clone()));
            }
        }
        let update = match self.form.begin_submit() {
            Ok(data) => data.to_update(),
            Err(_) => return Err(ClientError::Invalid(self.form.errors().clone())),
        };

        match app.backend.auth.update_profile(&update).await {
            Ok(user) => {
                self.form = profile::wizard(&user, self.form.data().today)?;
                app.state.lock().await.auth.user = Some(user.clone());
                app.persist().await;
                app.notifier.success("Profile updated successfully!");
                Ok(user)
            }
            Err(e) => {
                error!("Profile update error: {}", e);
                let message = e.user_message("Failed to update profile");
                self.form.fail_submit(message.clone());
                app.notifier.error(&message);
                Err(e.into())
            }
        }
    }
}
