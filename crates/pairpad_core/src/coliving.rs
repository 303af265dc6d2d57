//! crates/pairpad_core/src/coliving.rs
//!
//! Records for living spaces and the shared household dashboard.
//!
//! These are plain CRUD records. Split amounts, due dates, invitation expiry and
//! booking conflicts are all decided by the backend; the client only displays them.

use crate::domain::{blank_as_none, RecordId};
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//=========================================================================================
// Listings
//=========================================================================================

/// A list endpoint's body: either a bare array or a paginated `{ "results": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Paged { results } => results,
        }
    }
}

/// The minimal user reference embedded in co-living records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: RecordId,
    #[serde(default)]
    pub username: String,
}

//=========================================================================================
// Living spaces, rooms, images, bookings
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    #[default]
    Apartment,
    House,
    Condo,
    Dorm,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivingSpace {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub space_type: SpaceType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub total_bedrooms: Option<u32>,
    #[serde(default)]
    pub total_bathrooms: Option<Decimal>,
    #[serde(default)]
    pub total_rent: Option<Decimal>,
    #[serde(default)]
    pub utilities_included: bool,
    #[serde(default)]
    pub furnished: bool,
    #[serde(default)]
    pub parking_available: bool,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub lease_duration_months: Option<u32>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub images: Vec<SpaceImage>,
    #[serde(default)]
    pub house_rules: Option<HouseRules>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LivingSpace {
    pub fn primary_image(&self) -> Option<&SpaceImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }

    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.is_available)
    }
}

/// Body for creating or updating a living space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LivingSpaceDraft {
    pub name: String,
    pub space_type: SpaceType,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub total_bedrooms: u32,
    pub total_bathrooms: Decimal,
    pub total_rent: Decimal,
    pub utilities_included: bool,
    pub furnished: bool,
    pub parking_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_duration_months: Option<u32>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_rules: Option<HouseRulesDraft>,
}

/// Query parameters for `GET /coliving/spaces/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpaceSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<SpaceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size_sqft: Option<u32>,
    #[serde(default)]
    pub has_private_bathroom: bool,
    #[serde(default)]
    pub has_balcony: bool,
    #[serde(default)]
    pub furnished: bool,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub monthly_rent: Option<Decimal>,
    #[serde(default)]
    pub security_deposit: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub images: Vec<SpaceImage>,
    #[serde(default)]
    pub compatibility_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomDraft {
    pub living_space: RecordId,
    pub name: String,
    pub room_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_sqft: Option<u32>,
    pub has_private_bathroom: bool,
    pub furnished: bool,
    pub is_available: bool,
    pub monthly_rent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_deposit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_from: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceImage {
    pub id: RecordId,
    /// URL of the stored image.
    pub image: String,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub order: u32,
}

/// A new image for a living space, sent as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content: Bytes,
    pub caption: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub move_in_date: NaiveDate,
    pub lease_duration_months: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomApplication {
    pub id: RecordId,
    pub room: RecordId,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub review_message: Option<String>,
}

//=========================================================================================
// Tasks
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Cleaning,
    Maintenance,
    Groceries,
    Bills,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub living_space: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: TaskCategory,
    /// Username of the assignee.
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// The status a checkbox toggle moves the task to.
    pub fn toggled_status(&self) -> TaskStatus {
        if self.is_done() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskDraft {
    pub living_space: RecordId,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub recurrence: Recurrence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

//=========================================================================================
// Expenses and bills
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Groceries,
    Supplies,
    Maintenance,
    Internet,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    #[default]
    Equal,
    Custom,
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    #[serde(alias = "user")]
    pub user_id: RecordId,
    #[serde(default)]
    pub username: String,
    pub amount_owed: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub is_settled: bool,
}

impl ExpenseSplit {
    pub fn outstanding(&self) -> Decimal {
        if self.is_settled {
            Decimal::ZERO
        } else {
            (self.amount_owed - self.amount_paid).max(Decimal::ZERO)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub living_space: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub amount: Decimal,
    /// Username of the payer.
    #[serde(default)]
    pub paid_by: Option<String>,
    #[serde(default)]
    pub split_type: SplitType,
    #[serde(default)]
    pub expense_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub participants: Vec<UserRef>,
    #[serde(default)]
    pub splits: Vec<ExpenseSplit>,
}

impl Expense {
    pub fn is_settled(&self) -> bool {
        self.splits.iter().all(|split| split.is_settled)
    }

    pub fn outstanding(&self) -> Decimal {
        self.splits.iter().map(ExpenseSplit::outstanding).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseDraft {
    pub living_space: RecordId,
    pub title: String,
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_by_id: Option<RecordId>,
    pub split_type: SplitType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participant_ids: Vec<RecordId>,
    pub expense_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: RecordId,
    pub living_space: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default)]
    pub split_type: SplitType,
    #[serde(default)]
    pub paid_by: Option<String>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub splits: Vec<ExpenseSplit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BillDraft {
    pub living_space: RecordId,
    pub title: String,
    pub description: String,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Recurrence,
    pub split_type: SplitType,
}

//=========================================================================================
// Calendar, shopping, rules
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Meeting,
    Social,
    Maintenance,
    Cleaning,
    Guest,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: RecordId,
    pub living_space: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: EventType,
    pub start_datetime: DateTime<Utc>,
    #[serde(default)]
    pub end_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEventDraft {
    pub living_space: RecordId,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub start_datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
    pub all_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_purchased: bool,
    #[serde(default)]
    pub purchased_by: Option<String>,
    #[serde(default)]
    pub added_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: RecordId,
    pub living_space: RecordId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl ShoppingList {
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.is_purchased).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingItemDraft {
    pub name: String,
    pub quantity: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRules {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default = "yes")]
    pub guests_allowed: bool,
    /// Formatted range, e.g. "10:00 PM - 07:00 AM".
    #[serde(default)]
    pub quiet_hours: Option<String>,
    #[serde(default)]
    pub additional_rules: String,
    #[serde(default)]
    pub cleaning_schedule: String,
    #[serde(default = "yes")]
    pub shared_chores_rotation: bool,
    #[serde(default = "yes")]
    pub guest_notification_required: bool,
    #[serde(default = "three")]
    pub max_consecutive_guest_nights: u32,
}

fn yes() -> bool {
    true
}

fn three() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRulesDraft {
    pub smoking_allowed: bool,
    pub pets_allowed: bool,
    pub guests_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours_end: Option<String>,
    pub additional_rules: String,
    pub cleaning_schedule: String,
    pub shared_chores_rotation: bool,
    pub guest_notification_required: bool,
    pub max_consecutive_guest_nights: u32,
}

impl Default for HouseRulesDraft {
    fn default() -> Self {
        Self {
            smoking_allowed: false,
            pets_allowed: false,
            guests_allowed: true,
            quiet_hours_start: None,
            quiet_hours_end: None,
            additional_rules: String::new(),
            cleaning_schedule: String::new(),
            shared_chores_rotation: true,
            guest_notification_required: true,
            max_consecutive_guest_nights: 3,
        }
    }
}

impl From<&HouseRules> for HouseRulesDraft {
    fn from(rules: &HouseRules) -> Self {
        Self {
            smoking_allowed: rules.smoking_allowed,
            pets_allowed: rules.pets_allowed,
            guests_allowed: rules.guests_allowed,
            quiet_hours_start: None,
            quiet_hours_end: None,
            additional_rules: rules.additional_rules.clone(),
            cleaning_schedule: rules.cleaning_schedule.clone(),
            shared_chores_rotation: rules.shared_chores_rotation,
            guest_notification_required: rules.guest_notification_required,
            max_consecutive_guest_nights: rules.max_consecutive_guest_nights,
        }
    }
}

//=========================================================================================
// Members, invitations, notifications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
    Guest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: RecordId,
    pub user: RecordId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default = "yes")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: RecordId,
    pub living_space: RecordId,
    #[serde(default)]
    pub living_space_name: String,
    #[serde(default)]
    pub invited_by_name: String,
    pub invited_user: RecordId,
    #[serde(default)]
    pub status: InvitationStatus,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Computed by the backend.
    #[serde(default)]
    pub is_expired: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteRequest {
    pub user_id: RecordId,
    pub role: MemberRole,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    #[serde(default)]
    pub notification_type: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Dashboard aggregate
//=========================================================================================

/// Everything the shared dashboard shows for one living space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedDashboard {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    #[serde(default)]
    pub shopping_lists: Vec<ShoppingList>,
    #[serde(default)]
    pub house_rules: Option<HouseRules>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default, skip_deserializing)]
    pub members: Vec<Member>,
}

impl SharedDashboard {
    pub fn open_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_done()).count()
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }
}

/// Links a mutual match to the living space backing its shared dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInfo {
    pub match_id: RecordId,
    pub living_space_id: RecordId,
    #[serde(default)]
    pub living_space_name: Option<String>,
}
