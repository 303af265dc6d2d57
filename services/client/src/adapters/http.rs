//! services/client/src/adapters/http.rs
//!
//! The shared REST client every backend adapter is built on.
//!
//! It attaches the bearer token to each request and turns error responses into
//! `PortError`s with a single user-facing message.

use pairpad_core::ports::{PortError, PortResult, TokenStore};
use pairpad_core::validation::FieldErrors;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Body keys holding a message that is not tied to one field, in priority order.
const MESSAGE_KEYS: [&str; 3] = ["non_field_errors", "detail", "error"];

//=========================================================================================
// The REST Client
//=========================================================================================

/// A thin wrapper over `reqwest` bound to one backend and one token store.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: Arc<str>,
    tokens: Arc<dyn TokenStore>,
}

impl RestClient {
    /// Creates a new `RestClient`. `base_url` should not end with a slash.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request with the bearer token attached when one is stored.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> PortResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> PortResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> PortResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> PortResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// Posts a body and discards whatever the backend answers on success.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> PortResult<()> {
        self.send_unit(self.request(Method::POST, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> PortResult<()> {
        self.send_unit(self.request(Method::DELETE, path)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> PortResult<T> {
        self.send(self.request(Method::POST, path).multipart(form)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PortResult<T> {
        let (status, body) = Self::execute(request).await?;
        if !status.is_success() {
            return Err(Self::rejected(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to decode backend response: {}", e);
            PortError::Decode(e.to_string())
        })
    }

    async fn send_unit(&self, request: RequestBuilder) -> PortResult<()> {
        let (status, body) = Self::execute(request).await?;
        if !status.is_success() {
            return Err(Self::rejected(status, &body));
        }
        Ok(())
    }

    async fn execute(request: RequestBuilder) -> PortResult<(StatusCode, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;
        Ok((status, body))
    }

    fn rejected(status: StatusCode, body: &str) -> PortError {
        let error = normalize_error(status.as_u16(), body);
        warn!("Backend answered {}: {}", status, error);
        error
    }
}

//=========================================================================================
// Error Normalization
//=========================================================================================

/// Maps an error response to a `PortError`.
///
/// The message is taken from the body in a fixed priority: `non_field_errors[0]`,
/// `detail`, `error`, then the first entry of a field map such as
/// `{"email": ["already taken"]}`. When none is present the message is empty and
/// callers supply their own default.
pub fn normalize_error(status: u16, body: &str) -> PortError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let (message, fields) = match &parsed {
        Some(Value::Object(map)) => {
            let fields: FieldErrors = {
                let mut fields = FieldErrors::new();
                for (key, value) in map.iter().filter(|(k, _)| !MESSAGE_KEYS.contains(&k.as_str())) {
                    if let Some(text) = first_text(value) {
                        fields.insert(key.as_str(), text);
                    }
                }
                fields
            };
            let message = MESSAGE_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(first_text))
                .or_else(|| fields.fields().next().map(|(_, text)| text.to_string()))
                .unwrap_or_default();
            (message, fields)
        }
        Some(Value::String(text)) => (text.clone(), FieldErrors::new()),
        Some(Value::Array(items)) => (
            items.first().and_then(first_text).unwrap_or_default(),
            FieldErrors::new(),
        ),
        _ => (String::new(), FieldErrors::new()),
    };

    match status {
        401 => PortError::Unauthorized(message),
        404 => PortError::NotFound(if message.is_empty() {
            "resource".to_string()
        } else {
            message
        }),
        _ => PortError::Rejected {
            status,
            message,
            fields,
        },
    }
}

/// A string, or the first string of an array of strings.
fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(error: PortError) -> String {
        match error {
            PortError::Rejected { message, .. } => message,
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn non_field_errors_win_over_detail_and_fields() {
        let body = r#"{"detail": "d", "email": ["taken"], "non_field_errors": ["Invalid credentials"]}"#;
        assert_eq!(message_of(normalize_error(400, body)), "Invalid credentials");
    }

    #[test]
    fn detail_then_error_are_next() {
        assert_eq!(message_of(normalize_error(400, r#"{"detail": "Bad", "error": "Worse"}"#)), "Bad");
        assert_eq!(message_of(normalize_error(400, r#"{"error": "Worse"}"#)), "Worse");
    }

    #[test]
    fn field_map_supplies_message_and_fields() {
        let error = normalize_error(
            400,
            r#"{"email": ["user with this email already exists."], "username": "too short"}"#,
        );
        let fields = error.field_errors().cloned().unwrap();
        assert_eq!(fields.get("username"), Some("too short"));
        assert_eq!(
            message_of(error),
            "user with this email already exists."
        );
    }

    #[test]
    fn failed_login_keeps_its_401_detail() {
        let error = normalize_error(
            401,
            r#"{"detail": "No active account found with the given credentials"}"#,
        );
        assert_eq!(
            error.user_message("Invalid email or password"),
            "No active account found with the given credentials"
        );
    }

    #[test]
    fn unreadable_bodies_leave_the_message_empty() {
        let error = normalize_error(500, "<html>Server Error</html>");
        assert_eq!(error.user_message("Failed to update profile"), "Failed to update profile");
    }

    #[test]
    fn status_codes_map_to_specific_errors() {
        assert!(matches!(
            normalize_error(401, "{}"),
            PortError::Unauthorized(m) if m.is_empty()
        ));
        assert!(matches!(
            normalize_error(404, r#"{"detail": "Not found."}"#),
            PortError::NotFound(m) if m == "Not found."
        ));
    }
}
