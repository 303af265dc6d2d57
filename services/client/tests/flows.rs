//! services/client/tests/flows.rs
//!
//! Drives the flows end to end against the stub backend in `common`.

mod common;

use chrono::NaiveDate;
use client_lib::error::ClientError;
use client_lib::flows::auth::{login, logout, restore_session};
use client_lib::flows::{
    Conversation, DashboardController, DiscoverFeed, Notice, ProfileFlow, RegistrationFlow, Route,
};
use common::{Harness, PASSWORD, SPACE_ID, TOKEN};
use pairpad_core::coliving::TaskDraft;
use pairpad_core::domain::{RecordId, Role};
use pairpad_core::ports::TokenStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn task(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

//=========================================================================================
// Sessions
//=========================================================================================

#[tokio::test]
async fn login_stores_the_token_and_lands_on_the_assessment() {
    let h = Harness::start().await;

    let route = login(&h.app, "ana@example.com", PASSWORD).await.unwrap();

    assert_eq!(route, Route::Assessment);
    assert_eq!(h.tokens.get().as_deref(), Some(TOKEN));
    assert!(h.app.state.lock().await.auth.is_authenticated);
    assert_eq!(
        h.notices.last(),
        Some(Notice::Success("Welcome back, ana!".to_string()))
    );

    // The stub only answers the profile request when the bearer token is attached.
    assert!(restore_session(&h.app).await);
    assert_eq!(h.stub.count("GET /auth/profile/"), 1);
}

#[tokio::test]
async fn rejected_login_shows_the_backend_message() {
    let h = Harness::start().await;

    let result = login(&h.app, "ana@example.com", "wrong").await;

    assert!(matches!(result, Err(ClientError::Port(_))));
    assert_eq!(
        h.notices.errors(),
        vec!["No active account found with the given credentials".to_string()]
    );
    assert_eq!(h.tokens.get(), None);
    assert!(!h.app.state.lock().await.auth.is_authenticated);
}

#[tokio::test]
async fn blank_credentials_never_reach_the_backend() {
    let h = Harness::start().await;

    let result = login(&h.app, "  ", "").await;

    match result {
        Err(ClientError::Invalid(errors)) => {
            assert!(errors.contains("email"));
            assert!(errors.contains("password"));
        }
        other => panic!("expected local validation errors, got {:?}", other),
    }
    assert!(h.stub.calls().is_empty());
}

#[tokio::test]
async fn restoring_without_a_token_signs_out_without_a_request() {
    let h = Harness::start().await;

    assert!(!restore_session(&h.app).await);
    assert!(h.stub.calls().is_empty());
}

#[tokio::test]
async fn restoring_with_a_stale_token_clears_it() {
    let h = Harness::start().await;
    h.tokens.set("stale").unwrap();

    assert!(!restore_session(&h.app).await);
    assert_eq!(h.tokens.get(), None);
    assert!(!h.app.state.lock().await.auth.is_authenticated);
}

#[tokio::test]
async fn logout_succeeds_even_when_the_backend_fails() {
    let h = Harness::signed_in().await;

    let route = logout(&h.app).await.unwrap();

    assert_eq!(route, Route::Home);
    assert_eq!(h.tokens.get(), None);
    assert_eq!(h.stub.count("POST /auth/logout/"), 1);
    let state = h.app.state.lock().await;
    assert!(!state.auth.is_authenticated);
    assert!(state.auth.user.is_none());
}

//=========================================================================================
// Registration and profile
//=========================================================================================

fn fill_registration(flow: &mut RegistrationFlow, email: &str) {
    let form = flow.form_mut();
    form.edit("email", |f| f.email = email.to_string());
    form.edit("username", |f| f.username = "newcomer".to_string());
    form.edit("password", |f| f.password = "longenough".to_string());
    form.edit("confirm_password", |f| {
        f.confirm_password = "longenough".to_string()
    });
    assert_eq!(form.advance(), Ok(2));
    form.edit("role", |f| f.role = Some(Role::Student));
}

#[tokio::test]
async fn registration_signs_the_new_user_in() {
    let h = Harness::start().await;
    let mut flow = RegistrationFlow::new().unwrap();
    fill_registration(&mut flow, "new@example.com");

    let route = flow.submit(&h.app).await.unwrap();

    assert_eq!(route, Route::Assessment);
    assert!(flow.form().is_completed());
    assert_eq!(h.tokens.get().as_deref(), Some("tok-new"));
    assert_eq!(
        h.notices.last(),
        Some(Notice::Success("Welcome to PairPad, newcomer!".to_string()))
    );
}

#[tokio::test]
async fn registration_field_errors_return_to_the_owning_step() {
    let h = Harness::start().await;
    let mut flow = RegistrationFlow::new().unwrap();
    fill_registration(&mut flow, "taken@example.com");

    let result = flow.submit(&h.app).await;

    assert!(matches!(result, Err(ClientError::Port(_))));
    let form = flow.form();
    assert_eq!(form.current_step(), 1);
    assert_eq!(
        form.errors().get("email"),
        Some("user with this email already exists.")
    );
    assert_eq!(
        form.errors().general(),
        Some("user with this email already exists.")
    );
    assert_eq!(h.tokens.get(), None);
}

#[tokio::test]
async fn inverted_budget_is_refused_before_any_request() {
    let h = Harness::signed_in().await;
    let mut flow = ProfileFlow::for_current_user(&h.app, today()).await.unwrap();
    flow.form_mut().edit("budget_min", |f| f.budget_min = Some(1500));
    flow.form_mut().edit("budget_max", |f| f.budget_max = Some(900));

    let result = flow.save(&h.app).await;

    match result {
        Err(ClientError::Invalid(errors)) => assert!(errors.contains("budget_max")),
        other => panic!("expected a budget error, got {:?}", other),
    }
    assert_eq!(flow.form().current_step(), 2);
    assert_eq!(h.stub.count("PATCH /auth/profile/"), 0);
}

#[tokio::test]
async fn underage_birth_date_is_refused_before_any_request() {
    let h = Harness::signed_in().await;
    let mut flow = ProfileFlow::for_current_user(&h.app, today()).await.unwrap();
    let seventeen = NaiveDate::from_ymd_opt(2008, 10, 20).unwrap();
    flow.form_mut()
        .edit("date_of_birth", |f| f.date_of_birth = Some(seventeen));

    let result = flow.save(&h.app).await;

    match result {
        Err(ClientError::Invalid(errors)) => assert_eq!(
            errors.get("date_of_birth"),
            Some("You must be at least 18 years old")
        ),
        other => panic!("expected an age error, got {:?}", other),
    }
    assert_eq!(flow.form().current_step(), 1);
    assert!(h.stub.calls().is_empty());
}

#[tokio::test]
async fn saved_profile_replaces_the_cached_user() {
    let h = Harness::signed_in().await;
    let mut flow = ProfileFlow::for_current_user(&h.app, today()).await.unwrap();
    flow.form_mut().edit("first_name", |f| f.first_name = "Ana".to_string());
    flow.form_mut().edit("budget_min", |f| f.budget_min = Some(500));
    flow.form_mut().edit("budget_max", |f| f.budget_max = Some(900));

    let user = flow.save(&h.app).await.unwrap();

    assert_eq!(user.first_name.as_deref(), Some("Ana"));
    assert_eq!(user.budget_max, Some(900));
    let cached = h.app.current_user().await.unwrap();
    assert_eq!(cached.first_name.as_deref(), Some("Ana"));
    assert_eq!(
        h.notices.last(),
        Some(Notice::Success("Profile updated successfully!".to_string()))
    );

    // The form starts over from the saved user, so a second save goes through too.
    assert_eq!(flow.form().data().first_name, "Ana");
    flow.save(&h.app).await.unwrap();
    assert_eq!(h.stub.count("PATCH /auth/profile/"), 2);
}

//=========================================================================================
// Discover
//=========================================================================================

#[tokio::test]
async fn a_second_like_on_the_same_user_is_refused_while_the_first_runs() {
    let h = Harness::signed_in().await;
    let feed = DiscoverFeed::new();
    feed.load(&h.app).await.unwrap();

    let (first, second) = tokio::join!(
        feed.like(&h.app, RecordId(12)),
        feed.like(&h.app, RecordId(12))
    );

    let busy = [&first, &second]
        .iter()
        .filter(|r| matches!(r, Err(ClientError::Busy(_))))
        .count();
    assert_eq!(busy, 1);
    assert!(first.is_ok() || second.is_ok());
    assert_eq!(h.stub.count("POST /matching/accept/ 12"), 1);
    assert!(!feed.is_busy(RecordId(12)));
}

#[tokio::test]
async fn likes_on_different_users_run_side_by_side() {
    let h = Harness::signed_in().await;
    let feed = DiscoverFeed::new();
    feed.load(&h.app).await.unwrap();

    let (bo, cy) = tokio::join!(
        feed.like(&h.app, RecordId(11)),
        feed.like(&h.app, RecordId(12))
    );

    assert!(bo.unwrap().is_mutual());
    assert!(!cy.unwrap().is_mutual());
    let texts: Vec<String> = h
        .notices
        .notices()
        .iter()
        .map(|n| n.text().to_string())
        .collect();
    assert!(texts.contains(&"It's a match with bo! You can now start chatting.".to_string()));
    assert!(texts.contains(&"You liked cy!".to_string()));
    assert!(h.app.state.lock().await.matches.suggested.is_empty());
    // A mutual like reloads the match list.
    assert_eq!(h.stub.count("GET /matching/matches/"), 1);
}

#[tokio::test]
async fn match_requests_go_to_users_outside_the_feed() {
    let h = Harness::signed_in().await;
    let feed = DiscoverFeed::new();

    let outcome = feed.request_match(&h.app, RecordId(21)).await.unwrap();

    assert!(!outcome.is_mutual());
    assert_eq!(h.stub.count("POST /matching/request/ 21"), 1);
    assert_eq!(
        h.notices.last(),
        Some(Notice::Success("Match request sent!".to_string()))
    );
    assert!(!feed.is_busy(RecordId(21)));
}

//=========================================================================================
// Shared dashboard
//=========================================================================================

#[tokio::test]
async fn added_tasks_appear_after_the_reload() {
    let h = Harness::signed_in().await;
    let mut dash = DashboardController::open(&h.app, RecordId(SPACE_ID))
        .await
        .unwrap();
    assert!(dash.snapshot().tasks.is_empty());
    assert_eq!(dash.snapshot().members.len(), 2);

    let created = dash.add_task(&h.app, task("Take out the bins")).await.unwrap();

    assert_eq!(created.living_space, RecordId(SPACE_ID));
    assert_eq!(dash.snapshot().tasks.len(), 1);
    assert_eq!(
        h.notices.last(),
        Some(Notice::Success("Task created successfully!".to_string()))
    );

    dash.toggle_task(&h.app, created.id).await.unwrap();

    assert!(dash.snapshot().tasks[0].is_done());
    assert_eq!(
        h.notices.last(),
        Some(Notice::Success("Task completed!".to_string()))
    );
}

#[tokio::test]
async fn failed_actions_keep_the_previous_snapshot() {
    let h = Harness::signed_in().await;
    let mut dash = DashboardController::open(&h.app, RecordId(SPACE_ID))
        .await
        .unwrap();
    dash.add_task(&h.app, task("Water the plants")).await.unwrap();
    let before = dash.snapshot().clone();

    let result = dash.add_task(&h.app, task("boom")).await;

    assert!(matches!(result, Err(ClientError::Port(_))));
    assert_eq!(dash.snapshot(), &before);
    assert_eq!(
        h.notices.last(),
        Some(Notice::Error("Database unavailable".to_string()))
    );
}

#[tokio::test]
async fn untitled_tasks_are_refused_locally() {
    let h = Harness::signed_in().await;
    let mut dash = DashboardController::open(&h.app, RecordId(SPACE_ID))
        .await
        .unwrap();

    let result = dash.add_task(&h.app, task("   ")).await;

    assert!(matches!(result, Err(ClientError::Invalid(e)) if e.contains("title")));
    assert_eq!(h.stub.count("POST /coliving/tasks/"), 0);
}

#[tokio::test]
async fn a_match_dashboard_resolves_its_living_space() {
    let h = Harness::signed_in().await;

    let dash = DashboardController::open_for_match(&h.app, RecordId(40))
        .await
        .unwrap();

    assert_eq!(dash.space_id(), RecordId(SPACE_ID));
    assert_eq!(dash.match_id(), Some(RecordId(40)));
    assert!(dash.is_admin(RecordId(7)));
    assert!(!dash.is_admin(RecordId(11)));
    assert_eq!(
        h.stub.count(&format!("GET /coliving/dashboard/?living_space={}", SPACE_ID)),
        1
    );
}

//=========================================================================================
// Messaging
//=========================================================================================

#[tokio::test]
async fn sent_messages_are_trimmed_and_appended() {
    let h = Harness::signed_in().await;
    let conversation = Conversation::new(RecordId(40));
    conversation.load(&h.app).await.unwrap();

    let sent = conversation.send(&h.app, "  see you at six  ").await.unwrap();

    assert_eq!(sent.content, "see you at six");
    let state = h.app.state.lock().await;
    let thread = state.messages.messages(RecordId(40));
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[1].content, "see you at six");
    assert!(thread[0].read_status);
}

#[tokio::test]
async fn blank_messages_are_not_sent() {
    let h = Harness::signed_in().await;
    let conversation = Conversation::new(RecordId(40));

    let result = conversation.send(&h.app, " \n ").await;

    assert!(matches!(result, Err(ClientError::Invalid(_))));
    assert_eq!(h.stub.count("POST /messaging/send/"), 0);
}
