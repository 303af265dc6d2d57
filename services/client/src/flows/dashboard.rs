//! services/client/src/flows/dashboard.rs
//!
//! The shared household dashboard.
//!
//! `DashboardController` holds the last snapshot fetched from the backend. Every
//! section action sends one request and, once it succeeds, reloads the whole
//! snapshot. A failed action leaves the snapshot as it was; nothing is updated
//! ahead of the backend.

use crate::app::App;
use crate::error::ClientError;
use crate::flows::Route;
use pairpad_core::coliving::{
    Bill, BillDraft, CalendarEvent, CalendarEventDraft, Expense, ExpenseDraft, HouseRules,
    HouseRulesDraft, Invitation, InviteRequest, MemberRole, SharedDashboard, ShoppingItem,
    ShoppingItemDraft, ShoppingList, Task, TaskDraft, TaskStatus, TaskUpdate,
};
use pairpad_core::domain::RecordId;
use pairpad_core::forms::dashboard::{
    check_bill, check_event, check_expense, check_shopping_item, check_shopping_list, check_task,
};
use pairpad_core::ports::{PortError, PortResult};
use pairpad_core::validation::FieldErrors;
use std::future::Future;
use tracing::{error, info, warn};

const LOAD_FAILED: &str = "Failed to load shared dashboard";

pub struct DashboardController {
    space_id: RecordId,
    match_id: Option<RecordId>,
    snapshot: SharedDashboard,
}

impl DashboardController {
    /// Opens the dashboard of a living space.
    pub async fn open(app: &App, space_id: RecordId) -> Result<Self, ClientError> {
        let snapshot = match load(app, space_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to load dashboard: {}", e);
                app.notifier.error(LOAD_FAILED);
                return Err(e.into());
            }
        };
        Ok(Self {
            space_id,
            match_id: None,
            snapshot,
        })
    }

    /// Opens the dashboard a mutual match shares.
    pub async fn open_for_match(app: &App, match_id: RecordId) -> Result<Self, ClientError> {
        let info = match app.backend.dashboard.dashboard_info(match_id).await {
            Ok(info) => info,
            Err(e) => {
                error!("Failed to resolve the dashboard of match {}: {}", match_id, e);
                app.notifier.error(LOAD_FAILED);
                return Err(e.into());
            }
        };
        let mut controller = Self::open(app, info.living_space_id).await?;
        controller.match_id = Some(match_id);
        Ok(controller)
    }

    pub fn space_id(&self) -> RecordId {
        self.space_id
    }

    pub fn match_id(&self) -> Option<RecordId> {
        self.match_id
    }

    pub fn snapshot(&self) -> &SharedDashboard {
        &self.snapshot
    }

    /// Whether `user_id` administers this space.
    pub fn is_admin(&self, user_id: RecordId) -> bool {
        self.snapshot
            .members
            .iter()
            .any(|m| m.user == user_id && m.role == MemberRole::Admin)
    }

    /// Reloads the snapshot. On failure the previous snapshot stays.
    pub async fn refresh(&mut self, app: &App) -> Result<(), ClientError> {
        match load(app, self.space_id).await {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                error!("Failed to reload dashboard {}: {}", self.space_id, e);
                app.notifier.error(LOAD_FAILED);
                Err(e.into())
            }
        }
    }

    /// Awaits one section request, then reports and reloads.
    async fn run<T>(
        &mut self,
        app: &App,
        success: &str,
        failure: &str,
        request: impl Future<Output = PortResult<T>>,
    ) -> Result<T, ClientError> {
        match request.await {
            Ok(value) => {
                if !success.is_empty() {
                    app.notifier.success(success);
                }
                if let Err(e) = self.refresh(app).await {
                    warn!("Dashboard kept its previous snapshot: {}", e);
                }
                Ok(value)
            }
            Err(e) => {
                error!("{}: {}", failure, e);
                app.notifier.error(&e.user_message(failure));
                Err(e.into())
            }
        }
    }

    //=====================================================================================
    // Tasks
    //=====================================================================================

    pub async fn add_task(&mut self, app: &App, mut draft: TaskDraft) -> Result<Task, ClientError> {
        draft.living_space = self.space_id;
        reject_invalid(check_task(&draft))?;
        let request = app.backend.dashboard.create_task(&draft);
        self.run(app, "Task created successfully!", "Failed to create task", request)
            .await
    }

    /// Flips a task between completed and pending.
    pub async fn toggle_task(&mut self, app: &App, task_id: RecordId) -> Result<Task, ClientError> {
        let status = self
            .snapshot
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(Task::toggled_status)
            .ok_or_else(|| PortError::NotFound(format!("task {}", task_id)))?;
        let update = TaskUpdate {
            status: Some(status),
            ..Default::default()
        };
        let success = if status == TaskStatus::Completed {
            "Task completed!"
        } else {
            "Task reopened"
        };
        let request = app.backend.dashboard.update_task(task_id, &update);
        self.run(app, success, "Failed to update task", request).await
    }

    pub async fn delete_task(&mut self, app: &App, task_id: RecordId) -> Result<(), ClientError> {
        let request = app.backend.dashboard.delete_task(task_id);
        self.run(app, "Task deleted", "Failed to delete task", request)
            .await
    }

    //=====================================================================================
    // Expenses
    //=====================================================================================

    pub async fn add_expense(
        &mut self,
        app: &App,
        mut draft: ExpenseDraft,
    ) -> Result<Expense, ClientError> {
        draft.living_space = self.space_id;
        reject_invalid(check_expense(&draft))?;
        let request = app.backend.dashboard.create_expense(&draft);
        self.run(app, "Expense added successfully!", "Failed to add expense", request)
            .await
    }

    pub async fn update_expense(
        &mut self,
        app: &App,
        expense_id: RecordId,
        mut draft: ExpenseDraft,
    ) -> Result<Expense, ClientError> {
        draft.living_space = self.space_id;
        reject_invalid(check_expense(&draft))?;
        let request = app.backend.dashboard.update_expense(expense_id, &draft);
        self.run(
            app,
            "Expense updated successfully!",
            "Failed to update expense",
            request,
        )
        .await
    }

    pub async fn delete_expense(
        &mut self,
        app: &App,
        expense_id: RecordId,
    ) -> Result<(), ClientError> {
        let request = app.backend.dashboard.delete_expense(self.space_id, expense_id);
        self.run(
            app,
            "Expense deleted successfully",
            "Failed to delete expense",
            request,
        )
        .await
    }

    /// Flips whether `user_id` has paid their share of an expense.
    pub async fn toggle_split(
        &mut self,
        app: &App,
        expense_id: RecordId,
        user_id: RecordId,
    ) -> Result<Expense, ClientError> {
        let settled = self
            .snapshot
            .expenses
            .iter()
            .find(|e| e.id == expense_id)
            .and_then(|e| e.splits.iter().find(|s| s.user_id == user_id))
            .map(|split| split.is_settled)
            .ok_or_else(|| {
                PortError::NotFound(format!("share of user {} in expense {}", user_id, expense_id))
            })?;
        let success = if settled {
            "Marked as unpaid"
        } else {
            "Marked as paid"
        };
        let request = app.backend.dashboard.settle_split(expense_id, user_id, !settled);
        self.run(app, success, "Failed to update payment status", request)
            .await
    }

    //=====================================================================================
    // Bills
    //=====================================================================================

    pub async fn add_bill(&mut self, app: &App, mut draft: BillDraft) -> Result<Bill, ClientError> {
        draft.living_space = self.space_id;
        reject_invalid(check_bill(&draft))?;
        let request = app.backend.dashboard.create_bill(&draft);
        self.run(app, "Bill created successfully!", "Failed to create bill", request)
            .await
    }

    pub async fn pay_bill(&mut self, app: &App, bill_id: RecordId) -> Result<Bill, ClientError> {
        let request = app.backend.dashboard.mark_bill_paid(bill_id);
        self.run(app, "Bill marked as paid!", "Failed to mark bill as paid", request)
            .await
    }

    //=====================================================================================
    // Calendar
    //=====================================================================================

    pub async fn add_event(
        &mut self,
        app: &App,
        mut draft: CalendarEventDraft,
    ) -> Result<CalendarEvent, ClientError> {
        draft.living_space = self.space_id;
        reject_invalid(check_event(&draft))?;
        let request = app.backend.dashboard.create_event(&draft);
        self.run(app, "Event created!", "Failed to create event", request)
            .await
    }

    //=====================================================================================
    // Shopping
    //=====================================================================================

    pub async fn add_shopping_list(
        &mut self,
        app: &App,
        name: &str,
    ) -> Result<ShoppingList, ClientError> {
        reject_invalid(check_shopping_list(name))?;
        let request = app
            .backend
            .dashboard
            .create_shopping_list(self.space_id, name.trim());
        self.run(app, "Shopping list created!", "Failed to create list", request)
            .await
    }

    pub async fn add_shopping_item(
        &mut self,
        app: &App,
        list_id: RecordId,
        draft: ShoppingItemDraft,
    ) -> Result<ShoppingItem, ClientError> {
        reject_invalid(check_shopping_item(&draft))?;
        let request = app.backend.dashboard.add_shopping_item(list_id, &draft);
        self.run(app, "Item added!", "Failed to add item", request)
            .await
    }

    pub async fn toggle_shopping_item(
        &mut self,
        app: &App,
        item_id: RecordId,
    ) -> Result<ShoppingItem, ClientError> {
        let request = app.backend.dashboard.toggle_shopping_item(item_id);
        self.run(app, "", "Failed to update item", request).await
    }

    //=====================================================================================
    // House rules
    //=====================================================================================

    /// Creates the space's house rules, or updates them when they already exist.
    pub async fn save_house_rules(
        &mut self,
        app: &App,
        draft: HouseRulesDraft,
    ) -> Result<HouseRules, ClientError> {
        let existing = self.snapshot.house_rules.as_ref().and_then(|rules| rules.id);
        let failure = "Failed to save house rules";
        match existing {
            Some(rules_id) => {
                let request =
                    app.backend
                        .dashboard
                        .update_house_rules(self.space_id, rules_id, &draft);
                self.run(app, "House rules updated successfully", failure, request)
                    .await
            }
            None => {
                let request = app.backend.dashboard.create_house_rules(self.space_id, &draft);
                self.run(app, "House rules created successfully", failure, request)
                    .await
            }
        }
    }

    //=====================================================================================
    // Members and notifications
    //=====================================================================================

    pub async fn invite_member(
        &mut self,
        app: &App,
        invite: InviteRequest,
    ) -> Result<Invitation, ClientError> {
        let request = app.backend.dashboard.invite_member(self.space_id, &invite);
        self.run(
            app,
            "Invitation sent successfully!",
            "Failed to send invitation",
            request,
        )
        .await
    }

    pub async fn remove_member(
        &mut self,
        app: &App,
        member_id: RecordId,
    ) -> Result<(), ClientError> {
        let request = app.backend.dashboard.remove_member(self.space_id, member_id);
        self.run(
            app,
            "Member removed successfully",
            "Failed to remove member",
            request,
        )
        .await
    }

    /// Removes the signed-in user's own membership.
    pub async fn leave(&mut self, app: &App, me: RecordId) -> Result<Route, ClientError> {
        let Some(member_id) = self
            .snapshot
            .members
            .iter()
            .find(|m| m.user == me)
            .map(|m| m.id)
        else {
            app.notifier.error("Could not find your membership");
            return Err(PortError::NotFound(format!("membership of user {}", me)).into());
        };

        match app.backend.dashboard.remove_member(self.space_id, member_id).await {
            Ok(()) => {
                info!("Left living space {}", self.space_id);
                app.notifier.success("You have left the living space");
                Ok(Route::Dashboard)
            }
            Err(e) => {
                error!("Failed to leave space: {}", e);
                app.notifier.error(&e.user_message("Failed to leave space"));
                Err(e.into())
            }
        }
    }

    pub async fn dismiss_notification(
        &mut self,
        app: &App,
        notification_id: RecordId,
    ) -> Result<(), ClientError> {
        let request = app.backend.dashboard.mark_notification_read(notification_id);
        self.run(app, "", "Failed to dismiss notification", request)
            .await
    }
}

//=========================================================================================
// Invitations addressed to the signed-in user
//=========================================================================================

pub async fn invitations(app: &App) -> Result<Vec<Invitation>, ClientError> {
    app.backend.dashboard.invitations().await.map_err(|e| {
        error!("Failed to load invitations: {}", e);
        app.notifier.error(&e.user_message("Failed to load invitations"));
        e.into()
    })
}

/// Accepts or declines an invitation. Accepting routes to the space's dashboard.
pub async fn respond_to_invitation(
    app: &App,
    invitation_id: RecordId,
    accept: bool,
) -> Result<Option<Route>, ClientError> {
    match app
        .backend
        .dashboard
        .respond_to_invitation(invitation_id, accept)
        .await
    {
        Ok(invitation) if accept => {
            app.notifier.success("Invitation accepted!");
            Ok(Some(Route::Space(invitation.living_space)))
        }
        Ok(_) => {
            app.notifier.info("Invitation declined");
            Ok(None)
        }
        Err(e) => {
            error!("Failed to respond to invitation: {}", e);
            app.notifier
                .error(&e.user_message("Failed to respond to invitation"));
            Err(e.into())
        }
    }
}

async fn load(app: &App, space_id: RecordId) -> PortResult<SharedDashboard> {
    let mut snapshot = app.backend.dashboard.dashboard(space_id).await?;
    snapshot.members = app.backend.dashboard.members(space_id).await?;
    Ok(snapshot)
}

fn reject_invalid(errors: FieldErrors) -> Result<(), ClientError> {
    errors.into_result().map_err(ClientError::Invalid)
}
