//! services/client/src/state/matches.rs
//!
//! Cached matches, suggestions and conversation threads.

use pairpad_core::domain::{Match, MatchStatus, Message, RecordId, User};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStore {
    pub matches: Vec<Match>,
    pub suggested: Vec<User>,
}

impl MatchStore {
    pub fn set_matches(&mut self, matches: Vec<Match>) {
        self.matches = matches;
    }

    pub fn set_suggested(&mut self, suggested: Vec<User>) {
        self.suggested = suggested;
    }

    /// Adds a match, replacing any cached match with the same id.
    pub fn add_match(&mut self, new_match: Match) {
        self.matches.retain(|m| m.id != new_match.id);
        self.matches.push(new_match);
    }

    pub fn update_status(&mut self, match_id: RecordId, status: MatchStatus) {
        if let Some(found) = self.matches.iter_mut().find(|m| m.id == match_id) {
            found.status = status;
        }
    }

    /// Drops a user from the suggestion feed once they have been liked or passed.
    pub fn remove_suggested(&mut self, user_id: RecordId) {
        self.suggested.retain(|u| u.id != user_id);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageStore {
    threads: HashMap<RecordId, Vec<Message>>,
}

impl MessageStore {
    pub fn messages(&self, match_id: RecordId) -> &[Message] {
        self.threads.get(&match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_messages(&mut self, match_id: RecordId, messages: Vec<Message>) {
        self.threads.insert(match_id, messages);
    }

    pub fn add_message(&mut self, match_id: RecordId, message: Message) {
        self.threads.entry(match_id).or_default().push(message);
    }

    pub fn mark_as_read(&mut self, match_id: RecordId) {
        if let Some(thread) = self.threads.get_mut(&match_id) {
            thread.iter_mut().for_each(|m| m.read_status = true);
        }
    }

    pub fn unread(&self, match_id: RecordId) -> usize {
        self.messages(match_id).iter().filter(|m| !m.read_status).count()
    }
}
