//! services/client/src/adapters/dashboard.rs
//!
//! This module contains the adapter for the shared household dashboard.
//! It implements the `SharedDashboardService` port from the `core` crate.

use crate::adapters::http::RestClient;
use async_trait::async_trait;
use pairpad_core::coliving::{
    Bill, BillDraft, CalendarEvent, CalendarEventDraft, DashboardInfo, Expense, ExpenseDraft,
    HouseRules, HouseRulesDraft, Invitation, InviteRequest, Listing, Member, SharedDashboard,
    ShoppingItem, ShoppingItemDraft, ShoppingList, Task, TaskDraft, TaskUpdate,
};
use pairpad_core::domain::RecordId;
use pairpad_core::ports::{PortResult, SharedDashboardService};
use serde::Serialize;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct SpaceQuery {
    living_space: RecordId,
}

#[derive(Serialize)]
struct NewList<'a> {
    living_space: RecordId,
    name: &'a str,
}

#[derive(Serialize)]
struct Settlement {
    user_id: RecordId,
    settled: bool,
}

#[derive(Serialize)]
struct InvitationAnswer {
    accept: bool,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SharedDashboardService` port over the REST API.
#[derive(Clone)]
pub struct RestDashboardAdapter {
    rest: RestClient,
}

impl RestDashboardAdapter {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

//=========================================================================================
// `SharedDashboardService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SharedDashboardService for RestDashboardAdapter {
    async fn dashboard(&self, space_id: RecordId) -> PortResult<SharedDashboard> {
        self.rest
            .get_query(
                "/coliving/dashboard/",
                &SpaceQuery {
                    living_space: space_id,
                },
            )
            .await
    }

    async fn dashboard_info(&self, match_id: RecordId) -> PortResult<DashboardInfo> {
        self.rest
            .get(&format!("/coliving/dashboard/match/{}/", match_id))
            .await
    }

    // --- Tasks ---
    async fn create_task(&self, draft: &TaskDraft) -> PortResult<Task> {
        self.rest.post("/coliving/tasks/", draft).await
    }

    async fn update_task(&self, task_id: RecordId, update: &TaskUpdate) -> PortResult<Task> {
        self.rest
            .patch(&format!("/coliving/tasks/{}/", task_id), update)
            .await
    }

    async fn delete_task(&self, task_id: RecordId) -> PortResult<()> {
        self.rest
            .delete(&format!("/coliving/tasks/{}/", task_id))
            .await
    }

    // --- Expenses ---
    async fn create_expense(&self, draft: &ExpenseDraft) -> PortResult<Expense> {
        self.rest.post("/coliving/expenses/", draft).await
    }

    async fn update_expense(
        &self,
        expense_id: RecordId,
        draft: &ExpenseDraft,
    ) -> PortResult<Expense> {
        self.rest
            .put(&format!("/coliving/expenses/{}/", expense_id), draft)
            .await
    }

    async fn delete_expense(&self, space_id: RecordId, expense_id: RecordId) -> PortResult<()> {
        self.rest
            .delete(&format!(
                "/coliving/spaces/{}/expenses/{}/",
                space_id, expense_id
            ))
            .await
    }

    async fn settle_split(
        &self,
        expense_id: RecordId,
        user_id: RecordId,
        settled: bool,
    ) -> PortResult<Expense> {
        self.rest
            .post(
                &format!("/coliving/expenses/{}/settle/", expense_id),
                &Settlement { user_id, settled },
            )
            .await
    }

    // --- Bills ---
    async fn create_bill(&self, draft: &BillDraft) -> PortResult<Bill> {
        self.rest.post("/coliving/bills/", draft).await
    }

    async fn mark_bill_paid(&self, bill_id: RecordId) -> PortResult<Bill> {
        self.rest
            .post(
                &format!("/coliving/bills/{}/pay/", bill_id),
                &serde_json::json!({}),
            )
            .await
    }

    // --- Calendar ---
    async fn create_event(&self, draft: &CalendarEventDraft) -> PortResult<CalendarEvent> {
        self.rest.post("/coliving/events/", draft).await
    }

    // --- Shopping ---
    async fn create_shopping_list(
        &self,
        space_id: RecordId,
        name: &str,
    ) -> PortResult<ShoppingList> {
        self.rest
            .post(
                "/coliving/shopping-lists/",
                &NewList {
                    living_space: space_id,
                    name,
                },
            )
            .await
    }

    async fn add_shopping_item(
        &self,
        list_id: RecordId,
        draft: &ShoppingItemDraft,
    ) -> PortResult<ShoppingItem> {
        self.rest
            .post(&format!("/coliving/shopping-lists/{}/items/", list_id), draft)
            .await
    }

    async fn toggle_shopping_item(&self, item_id: RecordId) -> PortResult<ShoppingItem> {
        self.rest
            .post(
                &format!("/coliving/shopping-items/{}/toggle/", item_id),
                &serde_json::json!({}),
            )
            .await
    }

    // --- House rules ---
    async fn create_house_rules(
        &self,
        space_id: RecordId,
        draft: &HouseRulesDraft,
    ) -> PortResult<HouseRules> {
        self.rest
            .post(&format!("/coliving/spaces/{}/house-rules/", space_id), draft)
            .await
    }

    async fn update_house_rules(
        &self,
        space_id: RecordId,
        rules_id: RecordId,
        draft: &HouseRulesDraft,
    ) -> PortResult<HouseRules> {
        self.rest
            .put(
                &format!("/coliving/spaces/{}/house-rules/{}/", space_id, rules_id),
                draft,
            )
            .await
    }

    // --- Members and invitations ---
    async fn members(&self, space_id: RecordId) -> PortResult<Vec<Member>> {
        let members: Listing<Member> = self
            .rest
            .get(&format!("/coliving/spaces/{}/members/", space_id))
            .await?;
        Ok(members.into_vec())
    }

    async fn invite_member(
        &self,
        space_id: RecordId,
        invite: &InviteRequest,
    ) -> PortResult<Invitation> {
        self.rest
            .post(&format!("/coliving/spaces/{}/invite/", space_id), invite)
            .await
    }

    async fn remove_member(&self, space_id: RecordId, member_id: RecordId) -> PortResult<()> {
        self.rest
            .delete(&format!(
                "/coliving/spaces/{}/members/{}/",
                space_id, member_id
            ))
            .await
    }

    async fn invitations(&self) -> PortResult<Vec<Invitation>> {
        let invitations: Listing<Invitation> = self.rest.get("/coliving/invitations/").await?;
        Ok(invitations.into_vec())
    }

    async fn respond_to_invitation(
        &self,
        invitation_id: RecordId,
        accept: bool,
    ) -> PortResult<Invitation> {
        self.rest
            .post(
                &format!("/coliving/invitations/{}/respond/", invitation_id),
                &InvitationAnswer { accept },
            )
            .await
    }

    // --- Notifications ---
    async fn mark_notification_read(&self, notification_id: RecordId) -> PortResult<()> {
        self.rest
            .post_unit(
                &format!("/coliving/notifications/{}/read/", notification_id),
                &serde_json::json!({}),
            )
            .await
    }
}
