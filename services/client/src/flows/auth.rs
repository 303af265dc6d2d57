//! services/client/src/flows/auth.rs
//!
//! Sign-in, sign-up, sign-out and session restore.

use crate::app::App;
use crate::error::ClientError;
use crate::flows::Route;
use pairpad_core::forms::registration::{self, RegistrationForm};
use pairpad_core::validation::{require, FieldErrors};
use pairpad_core::wizard::MultiStepForm;
use tracing::{error, info};

/// Backend field names that the form knows under another name.
const FIELD_ALIASES: [(&str, &str); 1] = [("password_confirm", "confirm_password")];

/// Signs in and picks the landing page: the assessment until a personality
/// profile exists, the dashboard after.
pub async fn login(app: &App, email: &str, password: &str) -> Result<Route, ClientError> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "email", email, "Email is required");
    require(&mut errors, "password", password, "Password is required");
    if !errors.is_empty() {
        return Err(ClientError::Invalid(errors));
    }

    match app.backend.auth.login(email.trim(), password).await {
        Ok(session) => {
            let user = session.user;
            let route = if user.personality_profile.is_some() {
                Route::Dashboard
            } else {
                Route::Assessment
            };
            app.notifier
                .success(&format!("Welcome back, {}!", user.username));
            info!("Signed in as {}", user.username);
            app.state.lock().await.auth.login(user);
            app.persist().await;
            Ok(route)
        }
        Err(e) => {
            let message = e.user_message("Invalid email or password");
            app.notifier.error(&message);
            Err(e.into())
        }
    }
}

/// Forgets the session locally. The backend is told, but its answer does not matter.
pub async fn logout(app: &App) -> Result<Route, ClientError> {
    app.backend.auth.logout().await?;
    app.state.lock().await.reset();
    app.persist().await;
    info!("Signed out");
    Ok(Route::Home)
}

/// Re-validates a stored session on startup. Returns whether a user is signed in.
pub async fn restore_session(app: &App) -> bool {
    let signed_in = {
        let mut state = app.state.lock().await;
        state
            .auth
            .check_auth(app.backend.tokens.as_ref(), app.backend.auth.as_ref())
            .await
    };
    app.persist().await;
    signed_in
}

//=========================================================================================
// Registration
//=========================================================================================

pub struct RegistrationFlow {
    form: MultiStepForm<RegistrationForm>,
}

impl RegistrationFlow {
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self {
            form: registration::wizard()?,
        })
    }

    pub fn form(&self) -> &MultiStepForm<RegistrationForm> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MultiStepForm<RegistrationForm> {
        &mut self.form
    }

    /// Creates the account from the final step and signs the new user in.
    pub async fn submit(&mut self, app: &App) -> Result<Route, ClientError> {
        let registration = self
            .form
            .begin_submit()?
            .to_registration()
            .ok_or_else(|| ClientError::Internal("role missing after validation".to_string()))?;

        match app.backend.auth.register(&registration).await {
            Ok(session) => {
                self.form.complete();
                let user = session.user;
                app.notifier
                    .success(&format!("Welcome to PairPad, {}!", user.username));
                info!("Registered {}", user.username);
                app.state.lock().await.auth.login(user);
                app.persist().await;
                Ok(Route::Assessment)
            }
            Err(e) => {
                let message = e.user_message("Registration failed. Please try again.");
                error!("Registration failed: {}", e);
                match e.field_errors() {
                    Some(fields) => self
                        .form
                        .fail_submit_with_fields(message.clone(), rename_fields(fields)),
                    None => self.form.fail_submit(message.clone()),
                }
                app.notifier.error(&message);
                Err(e.into())
            }
        }
    }
}

fn rename_fields(fields: &FieldErrors) -> FieldErrors {
    let mut renamed = FieldErrors::new();
    for (field, message) in fields.fields() {
        let field = FIELD_ALIASES
            .iter()
            .find(|(backend, _)| *backend == field)
            .map(|(_, form)| *form)
            .unwrap_or(field);
        renamed.insert(field, message);
    }
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_confirmation_errors_land_on_the_form_field() {
        let mut fields = FieldErrors::new();
        fields.insert("password_confirm", "Passwords do not match");
        fields.insert("email", "taken");
        let renamed = rename_fields(&fields);
        assert_eq!(renamed.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(renamed.get("email"), Some("taken"));
        assert!(!renamed.contains("password_confirm"));
    }
}
