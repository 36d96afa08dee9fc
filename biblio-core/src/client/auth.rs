//! Login, registration and the session flows that own the credential

use super::ApiClient;
use crate::error::{BiblioError, Result};
use crate::types::{LoginRequest, RegisterRequest, TokenResponse, UserProfile};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Flatten a backend error body into one human-readable message
///
/// Understands `{"detail": "..."}`, validation lists of the form
/// `{"detail": [{"loc": [...], "msg": "..."}]}` (joined with `"; "`), and
/// `message`/`error` keys. Structured payloads are never returned verbatim.
pub fn flatten_error_detail(status: StatusCode, body: &str) -> String {
    let fallback = || match status.canonical_reason() {
        Some(reason) => format!("Request failed: {} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    };

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    let message = match value.get("detail") {
        Some(Value::String(detail)) => Some(detail.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items.iter().filter_map(field_message).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    };

    message
        .or_else(|| value.get("message").and_then(Value::as_str).map(String::from))
        .or_else(|| value.get("error").and_then(Value::as_str).map(String::from))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(fallback)
}

/// One validation entry: `"<field>: <msg>"`, or just the message
fn field_message(item: &Value) -> Option<String> {
    let msg = match item {
        Value::String(s) => return Some(s.clone()),
        other => other.get("msg")?.as_str()?,
    };

    // The last `loc` element names the field; "body" alone is not useful
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .and_then(|last| match last {
            Value::String(s) if s != "body" => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    Some(match field {
        Some(field) => format!("{}: {}", field, msg),
        None => msg.to_string(),
    })
}

impl ApiClient {
    async fn post_auth<B: Serialize>(&self, path: &str, body: &B) -> Result<TokenResponse> {
        let req = self.request(Method::POST, path).await.json(body);
        let response = self.send(req).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = flatten_error_detail(status, &body);
            tracing::debug!("{} rejected ({}): {}", path, status, message);
            return Err(BiblioError::Auth(message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BiblioError::Decode(e.to_string()))
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        self.post_auth("/auth/login", &LoginRequest::new(email, password))
            .await
    }

    /// `POST /auth/register`
    pub async fn register(&self, user: &RegisterRequest) -> Result<TokenResponse> {
        self.post_auth("/auth/register", user).await
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<UserProfile> {
        self.get_json("/auth/me").await
    }
}

/// Login/registration/logout flows: the only writers of the credential
pub struct AuthSession<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthSession<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and persist the returned access token
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let token = self.client.login(email, password).await?;
        self.store(&token).await?;
        tracing::info!("Logged in as {}", email);
        Ok(token)
    }

    /// Register and persist the returned access token
    pub async fn register(&self, user: &RegisterRequest) -> Result<TokenResponse> {
        let token = self.client.register(user).await?;
        self.store(&token).await?;
        tracing::info!("Registered {}", user.email);
        Ok(token)
    }

    /// Forget the stored credential
    pub async fn logout(&self) -> Result<()> {
        self.client.credentials().clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Whether a credential is currently stored
    pub async fn is_logged_in(&self) -> bool {
        self.client.bearer().await.is_some()
    }

    async fn store(&self, token: &TokenResponse) -> Result<()> {
        if token.access_token.is_empty() {
            return Err(BiblioError::Auth("Server returned an empty access token".into()));
        }
        self.client.credentials().set(&token.access_token).await?;
        Ok(())
    }
}
