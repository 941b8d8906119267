//! Common transport-layer types shared between the gateway, the compute core and the UI.
//! These structs mirror the REST API request/response payloads so every layer can
//! deserialize responses without duplicating shapes.

pub mod aggregates;
pub mod format;
pub mod records;

pub use aggregates::*;
pub use format::{format_count, format_currency, format_currency_f64, format_percentage, quarter_label};
pub use records::*;

use serde::{Deserialize, Serialize};

// ===================== Auth =====================

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Profile of the signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<i32>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserProfile {
    /// Name shown in the navbar, falling back to the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Login response. Older backends return only `{token}`, newer ones `{user}` and
/// optionally a token alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Explicit user context threaded into every page and gateway call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserContext {
    pub username: String,
    pub token: String,
}

impl UserContext {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: String,
}

// ===================== AI insight =====================

/// Request body for `POST /ai-insight`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightRequest {
    pub query: String,
}

/// Plain-language answer produced by the insight endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InsightResponse {
    #[serde(default)]
    pub insight: Option<String>,
    #[serde(default)]
    pub sql_used: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_with_user_only() {
        let json = r#"{
            "message": "Login successful",
            "user": {
                "user_id": 7,
                "username": "jdoe",
                "email": "jdoe@example.com",
                "first_name": "Jane",
                "last_name": "Doe",
                "role": "account-executive"
            }
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        let user = response.user.unwrap();
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.display_name(), "Jane Doe");
        assert!(response.token.is_none());
    }

    #[test]
    fn test_login_response_with_token_only() {
        let response: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(response.token.as_deref(), Some("abc"));
        assert!(response.user.is_none());
    }

    #[test]
    fn test_error_response_accepts_message_alias() {
        let body: ErrorResponse = serde_json::from_str(r#"{"message": "Login failed!"}"#).unwrap();
        assert_eq!(body.error, "Login failed!");
    }
}
