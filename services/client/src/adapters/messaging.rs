//! services/client/src/adapters/messaging.rs
//!
//! This module contains the adapter for the messaging endpoints.
//! It implements the `MessagingService` port from the `core` crate.

use crate::adapters::http::RestClient;
use async_trait::async_trait;
use pairpad_core::domain::{Message, RecordId};
use pairpad_core::ports::{MessagingService, PortResult};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct Thread {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Outgoing<'a> {
    match_id: RecordId,
    content: &'a str,
}

/// An adapter that implements the `MessagingService` port over the REST API.
#[derive(Clone)]
pub struct RestMessagingAdapter {
    rest: RestClient,
}

impl RestMessagingAdapter {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl MessagingService for RestMessagingAdapter {
    async fn messages(&self, match_id: RecordId) -> PortResult<Vec<Message>> {
        let thread: Thread = self.rest.get(&format!("/messaging/{}/", match_id)).await?;
        Ok(thread
            .messages
            .into_iter()
            .map(|mut message| {
                message.match_id.get_or_insert(match_id);
                message
            })
            .collect())
    }

    async fn send(&self, match_id: RecordId, content: &str) -> PortResult<Message> {
        let mut message: Message = self
            .rest
            .post("/messaging/send/", &Outgoing { match_id, content })
            .await?;
        message.match_id.get_or_insert(match_id);
        Ok(message)
    }
}
