//! services/client/tests/common/mod.rs
//!
//! A stub PairPad backend bound to a random local port, and an `App` wired to it.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use client_lib::adapters::MemoryTokenStore;
use client_lib::app::{App, Backend};
use client_lib::flows::RecordingNotifier;
use client_lib::state::MemoryStorage;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "tok-ana";
pub const PASSWORD: &str = "correct-horse";
pub const SPACE_ID: i64 = 3;

type Reply = (StatusCode, Json<Value>);

/// Requests the stub has served, as "METHOD /path" strings without the `/api` prefix.
#[derive(Default)]
pub struct Stub {
    calls: Mutex<Vec<String>>,
    tasks: Mutex<Vec<Value>>,
}

impl Stub {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }
}

pub fn user(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", username),
        "username": username,
        "role": "student"
    })
}

pub struct Harness {
    pub app: App,
    pub stub: Arc<Stub>,
    pub tokens: Arc<MemoryTokenStore>,
    pub notices: Arc<RecordingNotifier>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::with_tokens(MemoryTokenStore::new()).await
    }

    /// A harness whose app already holds ana's session.
    pub async fn signed_in() -> Self {
        let harness = Self::with_tokens(MemoryTokenStore::with_token(TOKEN)).await;
        let ana = serde_json::from_value(user(7, "ana")).unwrap();
        harness.app.state.lock().await.auth.login(ana);
        harness
    }

    async fn with_tokens(tokens: MemoryTokenStore) -> Self {
        let stub = Arc::new(Stub::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = routes(stub.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let tokens = Arc::new(tokens);
        let notices = Arc::new(RecordingNotifier::new());
        let backend = Backend::rest(&format!("http://{}/api", addr), tokens.clone());
        let app = App::new(backend, Arc::new(MemoryStorage::new()), notices.clone()).unwrap();
        Self {
            app,
            stub,
            tokens,
            notices,
        }
    }
}

fn routes(stub: Arc<Stub>) -> Router {
    Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/register/", post(register))
        .route("/api/auth/logout/", post(logout))
        .route("/api/auth/profile/", get(profile).patch(update_profile))
        .route("/api/matching/suggestions/", get(suggestions))
        .route("/api/matching/matches/", get(matches))
        .route("/api/matching/accept/", post(accept))
        .route("/api/matching/request/", post(request_match))
        .route("/api/messaging/send/", post(send_message))
        .route("/api/messaging/{id}/", get(thread))
        .route("/api/coliving/dashboard/", get(dashboard))
        .route("/api/coliving/dashboard/match/{id}/", get(dashboard_info))
        .route("/api/coliving/spaces/{id}/members/", get(members))
        .route("/api/coliving/tasks/", post(create_task))
        .route("/api/coliving/tasks/{id}/", patch(update_task))
        .with_state(stub)
}

//=========================================================================================
// Auth
//=========================================================================================

async fn login(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record("POST /auth/login/");
    if body["password"] == PASSWORD {
        let session = json!({ "user": user(7, "ana"), "access": TOKEN, "refresh": "r-ana" });
        (StatusCode::OK, Json(session))
    } else {
        let error = json!({ "detail": "No active account found with the given credentials" });
        (StatusCode::UNAUTHORIZED, Json(error))
    }
}

async fn register(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record("POST /auth/register/");
    if body["email"] == "taken@example.com" {
        let error = json!({ "email": ["user with this email already exists."] });
        return (StatusCode::BAD_REQUEST, Json(error));
    }
    let username = body["username"].as_str().unwrap_or("newcomer");
    let session = json!({
        "user": user(8, username),
        "tokens": { "access": "tok-new", "refresh": "r-new" }
    });
    (StatusCode::CREATED, Json(session))
}

async fn logout(State(stub): State<Arc<Stub>>) -> Reply {
    stub.record("POST /auth/logout/");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })))
}

async fn profile(State(stub): State<Arc<Stub>>, headers: HeaderMap) -> Reply {
    stub.record("GET /auth/profile/");
    let expected = format!("Bearer {}", TOKEN);
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    if bearer == Some(expected.as_str()) {
        (StatusCode::OK, Json(user(7, "ana")))
    } else {
        let error = json!({ "detail": "Authentication credentials were not provided." });
        (StatusCode::UNAUTHORIZED, Json(error))
    }
}

async fn update_profile(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record("PATCH /auth/profile/");
    let mut merged = user(7, "ana");
    if let (Some(target), Value::Object(changes)) = (merged.as_object_mut(), body) {
        target.extend(changes);
    }
    (StatusCode::OK, Json(merged))
}

//=========================================================================================
// Matching and messaging
//=========================================================================================

async fn suggestions(State(stub): State<Arc<Stub>>) -> Reply {
    stub.record("GET /matching/suggestions/");
    (StatusCode::OK, Json(json!([user(11, "bo"), user(12, "cy")])))
}

async fn matches(State(stub): State<Arc<Stub>>) -> Reply {
    stub.record("GET /matching/matches/");
    (StatusCode::OK, Json(json!([])))
}

/// Likes take a moment so overlapping actions can be observed. User 11 likes back.
async fn accept(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record(format!("POST /matching/accept/ {}", body["user_id"]));
    tokio::time::sleep(Duration::from_millis(100)).await;
    if body["user_id"] == 11 {
        let outcome = json!({ "message": "It's a match!", "match_id": 40 });
        (StatusCode::OK, Json(outcome))
    } else {
        (StatusCode::OK, Json(json!({ "message": "Like sent" })))
    }
}

async fn request_match(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record(format!("POST /matching/request/ {}", body["user_id"]));
    (StatusCode::CREATED, Json(json!({ "message": "Match request sent" })))
}

async fn thread(State(stub): State<Arc<Stub>>, Path(id): Path<i64>) -> Reply {
    stub.record(format!("GET /messaging/{}/", id));
    let thread = json!({
        "messages": [
            { "id": 1, "sender": "bo", "content": "hi", "timestamp": "2026-10-01T10:00:00Z" }
        ]
    });
    (StatusCode::OK, Json(thread))
}

async fn send_message(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record("POST /messaging/send/");
    let message = json!({
        "id": 2,
        "sender": "ana",
        "content": body["content"],
        "match_id": body["match_id"],
        "timestamp": "2026-10-01T10:05:00Z"
    });
    (StatusCode::CREATED, Json(message))
}

//=========================================================================================
// Shared dashboard
//=========================================================================================

async fn dashboard(
    State(stub): State<Arc<Stub>>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let space = query.get("living_space").cloned().unwrap_or_default();
    stub.record(format!("GET /coliving/dashboard/?living_space={}", space));
    let tasks = stub.tasks.lock().unwrap().clone();
    (StatusCode::OK, Json(json!({ "tasks": tasks })))
}

async fn dashboard_info(State(stub): State<Arc<Stub>>, Path(id): Path<i64>) -> Reply {
    stub.record(format!("GET /coliving/dashboard/match/{}/", id));
    let info = json!({
        "match_id": id,
        "living_space_id": SPACE_ID,
        "living_space_name": "Maple House"
    });
    (StatusCode::OK, Json(info))
}

async fn members(State(stub): State<Arc<Stub>>, Path(id): Path<i64>) -> Reply {
    stub.record(format!("GET /coliving/spaces/{}/members/", id));
    let members = json!([
        { "id": 100, "user": 7, "username": "ana", "role": "admin" },
        { "id": 101, "user": 11, "username": "bo", "role": "member" }
    ]);
    (StatusCode::OK, Json(members))
}

async fn create_task(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Reply {
    stub.record("POST /coliving/tasks/");
    if body["title"] == "boom" {
        let error = json!({ "error": "Database unavailable" });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(error));
    }
    let mut tasks = stub.tasks.lock().unwrap();
    let task = json!({
        "id": tasks.len() as i64 + 1,
        "living_space": body["living_space"],
        "title": body["title"],
        "description": body["description"],
        "status": "pending"
    });
    tasks.push(task.clone());
    (StatusCode::CREATED, Json(task))
}

async fn update_task(
    State(stub): State<Arc<Stub>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    stub.record(format!("PATCH /coliving/tasks/{}/", id));
    let mut tasks = stub.tasks.lock().unwrap();
    match tasks.iter_mut().find(|task| task["id"] == id) {
        Some(task) => {
            if let Some(status) = body.get("status") {
                task["status"] = status.clone();
            }
            (StatusCode::OK, Json(task.clone()))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))),
    }
}
