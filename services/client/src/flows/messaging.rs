//! services/client/src/flows/messaging.rs
//!
//! One conversation thread with a match.

use crate::app::App;
use crate::error::ClientError;
use pairpad_core::domain::{Message, RecordId};
use pairpad_core::forms::dashboard::check_message;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversation {
    pub match_id: RecordId,
}

impl Conversation {
    pub fn new(match_id: RecordId) -> Self {
        Self { match_id }
    }

    /// Loads the thread into the message store and marks it read.
    pub async fn load(&self, app: &App) -> Result<Vec<Message>, ClientError> {
        match app.backend.messaging.messages(self.match_id).await {
            Ok(messages) => {
                let mut state = app.state.lock().await;
                state.messages.set_messages(self.match_id, messages.clone());
                state.messages.mark_as_read(self.match_id);
                Ok(messages)
            }
            Err(e) => {
                error!("Failed to load messages: {}", e);
                app.notifier.error(&e.user_message("Failed to load messages"));
                Err(e.into())
            }
        }
    }

    /// Sends trimmed content and appends what the backend stored.
    pub async fn send(&self, app: &App, content: &str) -> Result<Message, ClientError> {
        let errors = check_message(content);
        if !errors.is_empty() {
            return Err(ClientError::Invalid(errors));
        }

        match app.backend.messaging.send(self.match_id, content.trim()).await {
            Ok(message) => {
                app.state
                    .lock()
                    .await
                    .messages
                    .add_message(self.match_id, message.clone());
                Ok(message)
            }
            Err(e) => {
                error!("Failed to send message: {}", e);
                app.notifier.error(&e.user_message("Failed to send message"));
                Err(e.into())
            }
        }
    }
}
