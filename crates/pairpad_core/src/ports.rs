//! crates/pairpad_core/src/ports.rs
//!
//! Defines the service contracts (traits) the client is written against.
//! The backend sits behind the service traits; local persistence sits behind
//! `TokenStore` and `StateStorage`.

use crate::coliving::{
    BillDraft, Bill, BookingRequest, CalendarEvent, CalendarEventDraft, DashboardInfo, Expense,
    ExpenseDraft, HouseRules, HouseRulesDraft, ImageUpdate, ImageUpload, Invitation,
    InviteRequest, LivingSpace, LivingSpaceDraft, Member, Room, RoomApplication, RoomDraft,
    SharedDashboard, ShoppingItem, ShoppingItemDraft, ShoppingList, SpaceImage, SpaceSearch, Task,
    TaskDraft, TaskUpdate,
};
use crate::domain::{
    AuthSession, CompatibilityReport, LikeOutcome, Match, MatchRequest, Message,
    OnboardingProgress, PersonalityProfile, ProfileUpdate, RecordId, Registration,
    RequestResponse, User,
};
use crate::forms::assessment::{AssessmentQuestion, AssessmentSubmission};
use crate::validation::FieldErrors;
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A 401. The backend's message, possibly empty, is kept: a failed login
    /// answers 401 too.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The backend answered with an error status. `message` is the normalized
    /// backend message and may be empty.
    #[error("Request rejected with status {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        fields: FieldErrors,
    },
    #[error("Could not reach the server: {0}")]
    Transport(String),
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The message to show the user, or `fallback` when the error carries none
    /// worth showing.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            PortError::Rejected { message, .. } | PortError::Unauthorized(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            PortError::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Per-field messages the backend attached to a rejection.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            PortError::Rejected { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Backend Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Logs in and stores the issued bearer token.
    async fn login(&self, email: &str, password: &str) -> PortResult<AuthSession>;

    /// Creates an account and stores the issued bearer token.
    async fn register(&self, registration: &Registration) -> PortResult<AuthSession>;

    /// Forgets the local token, then tells the backend. The backend's answer is ignored.
    async fn logout(&self) -> PortResult<()>;

    async fn profile(&self) -> PortResult<User>;

    async fn update_profile(&self, update: &ProfileUpdate) -> PortResult<User>;

    async fn public_profile(&self, user_id: RecordId) -> PortResult<User>;

    async fn onboarding_progress(&self) -> PortResult<OnboardingProgress>;

    async fn update_onboarding_step(
        &self,
        step: &str,
        completed: bool,
    ) -> PortResult<OnboardingProgress>;
}

#[async_trait]
pub trait PersonalityService: Send + Sync {
    /// The backend's question list. Empty when the backend has none configured.
    async fn assessment_questions(&self) -> PortResult<Vec<AssessmentQuestion>>;

    async fn submit_assessment(
        &self,
        submission: &AssessmentSubmission,
    ) -> PortResult<PersonalityProfile>;
}

#[async_trait]
pub trait MatchingService: Send + Sync {
    async fn suggestions(&self) -> PortResult<Vec<User>>;

    async fn matches(&self) -> PortResult<Vec<Match>>;

    /// Incoming likes the current user has not answered.
    async fn requests(&self) -> PortResult<Vec<MatchRequest>>;

    /// Likes a suggested user.
    async fn accept(&self, user_id: RecordId) -> PortResult<LikeOutcome>;

    /// Passes on a suggested user.
    async fn reject(&self, user_id: RecordId) -> PortResult<()>;

    /// Answers the like `requester_id` sent.
    async fn respond_to_request(
        &self,
        requester_id: RecordId,
        response: RequestResponse,
    ) -> PortResult<LikeOutcome>;

    /// Sends a match request from a public profile.
    async fn request_match(&self, user_id: RecordId) -> PortResult<LikeOutcome>;

    async fn compatibility_with(&self, user_id: RecordId) -> PortResult<CompatibilityReport>;
}

#[async_trait]
pub trait MessagingService: Send + Sync {
    async fn messages(&self, match_id: RecordId) -> PortResult<Vec<Message>>;

    async fn send(&self, match_id: RecordId, content: &str) -> PortResult<Message>;
}

#[async_trait]
pub trait ColivingService: Send + Sync {
    async fn spaces(&self, search: &SpaceSearch) -> PortResult<Vec<LivingSpace>>;

    async fn space(&self, space_id: RecordId) -> PortResult<LivingSpace>;

    /// Spaces the current user created.
    async fn my_spaces(&self) -> PortResult<Vec<LivingSpace>>;

    async fn create_space(&self, draft: &LivingSpaceDraft) -> PortResult<LivingSpace>;

    async fn update_space(
        &self,
        space_id: RecordId,
        draft: &LivingSpaceDraft,
    ) -> PortResult<LivingSpace>;

    async fn delete_space(&self, space_id: RecordId) -> PortResult<()>;

    async fn create_room(&self, draft: &RoomDraft) -> PortResult<Room>;

    async fn upload_image(&self, space_id: RecordId, upload: ImageUpload) -> PortResult<SpaceImage>;

    async fn update_image(&self, image_id: RecordId, update: &ImageUpdate) -> PortResult<SpaceImage>;

    async fn delete_image(&self, image_id: RecordId) -> PortResult<()>;

    async fn book_room(
        &self,
        room_id: RecordId,
        booking: &BookingRequest,
    ) -> PortResult<RoomApplication>;
}

#[async_trait]
pub trait SharedDashboardService: Send + Sync {
    async fn dashboard(&self, space_id: RecordId) -> PortResult<SharedDashboard>;

    /// Resolves the living space behind a mutual match's shared dashboard.
    async fn dashboard_info(&self, match_id: RecordId) -> PortResult<DashboardInfo>;

    // --- Tasks ---
    async fn create_task(&self, draft: &TaskDraft) -> PortResult<Task>;

    async fn update_task(&self, task_id: RecordId, update: &TaskUpdate) -> PortResult<Task>;

    async fn delete_task(&self, task_id: RecordId) -> PortResult<()>;

    // --- Expenses ---
    async fn create_expense(&self, draft: &ExpenseDraft) -> PortResult<Expense>;

    async fn update_expense(&self, expense_id: RecordId, draft: &ExpenseDraft)
        -> PortResult<Expense>;

    async fn delete_expense(&self, space_id: RecordId, expense_id: RecordId) -> PortResult<()>;

    /// Marks one participant's share as paid or unpaid.
    async fn settle_split(
        &self,
        expense_id: RecordId,
        user_id: RecordId,
        settled: bool,
    ) -> PortResult<Expense>;

    // --- Bills ---
    async fn create_bill(&self, draft: &BillDraft) -> PortResult<Bill>;

    async fn mark_bill_paid(&self, bill_id: RecordId) -> PortResult<Bill>;

    // --- Calendar ---
    async fn create_event(&self, draft: &CalendarEventDraft) -> PortResult<CalendarEvent>;

    // --- Shopping ---
    async fn create_shopping_list(&self, space_id: RecordId, name: &str)
        -> PortResult<ShoppingList>;

    async fn add_shopping_item(
        &self,
        list_id: RecordId,
        draft: &ShoppingItemDraft,
    ) -> PortResult<ShoppingItem>;

    /// Flips an item between purchased and not purchased.
    async fn toggle_shopping_item(&self, item_id: RecordId) -> PortResult<ShoppingItem>;

    // --- House rules ---
    async fn create_house_rules(
        &self,
        space_id: RecordId,
        draft: &HouseRulesDraft,
    ) -> PortResult<HouseRules>;

    async fn update_house_rules(
        &self,
        space_id: RecordId,
        rules_id: RecordId,
        draft: &HouseRulesDraft,
    ) -> PortResult<HouseRules>;

    // --- Members and invitations ---
    async fn members(&self, space_id: RecordId) -> PortResult<Vec<Member>>;

    async fn invite_member(
        &self,
        space_id: RecordId,
        invite: &InviteRequest,
    ) -> PortResult<Invitation>;

    async fn remove_member(&self, space_id: RecordId, member_id: RecordId) -> PortResult<()>;

    async fn invitations(&self) -> PortResult<Vec<Invitation>>;

    async fn respond_to_invitation(
        &self,
        invitation_id: RecordId,
        accept: bool,
    ) -> PortResult<Invitation>;

    // --- Notifications ---
    async fn mark_notification_read(&self, notification_id: RecordId) -> PortResult<()>;
}

//=========================================================================================
// Local Persistence Ports
//=========================================================================================

/// Holds the bearer token attached to every backend request.
pub trait TokenStore: Send + Sync {
    /// The current token, or `None` when absent or expired.
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str) -> PortResult<()>;

    fn clear(&self) -> PortResult<()>;
}

/// Named JSON snapshots of application state.
pub trait StateStorage: Send + Sync {
    fn load(&self, key: &str) -> PortResult<Option<serde_json::Value>>;

    fn save(&self, key: &str, value: &serde_json::Value) -> PortResult<()>;

    fn remove(&self, key: &str) -> PortResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_is_shown_verbatim() {
        let mut fields = FieldErrors::new();
        fields.insert("email", "user with this email already exists.");
        let err = PortError::Rejected {
            status: 400,
            message: "user with this email already exists.".into(),
            fields,
        };
        assert_eq!(
            err.user_message("Registration failed. Please try again."),
            "user with this email already exists."
        );
        assert!(err.field_errors().is_some_and(|f| f.contains("email")));
    }

    #[test]
    fn unauthorized_shows_the_backend_detail_when_present() {
        let bad_login =
            PortError::Unauthorized("No active account found with the given credentials".into());
        assert_eq!(
            bad_login.user_message("Invalid email or password"),
            "No active account found with the given credentials"
        );
        assert_eq!(
            PortError::Unauthorized(String::new()).user_message("Failed to load matches"),
            "Your session has expired. Please log in again."
        );
    }

    #[test]
    fn transport_failures_fall_back_to_the_default_message() {
        let err = PortError::Transport("connection refused".into());
        assert_eq!(err.user_message("Failed to update profile"), "Failed to update profile");
        assert!(err.field_errors().is_none());
    }
}
