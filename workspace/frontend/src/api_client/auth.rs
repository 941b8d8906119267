use common::{LoginRequest, LoginResponse, UserProfile};
use compute::GatewayError;
use crate::api_client;

/// Signed-in user as returned by the login endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub profile: UserProfile,
    /// Empty when the backend does not issue tokens
    pub token: String,
}

/// Log in with a username and password
pub async fn login(username: &str, password: &str) -> Result<LoginOutcome, GatewayError> {
    log::trace!("Logging in as: {}", username);
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = api_client::post("/auth/login", None, &request).await?;

    let outcome = login_outcome(username, response);
    log::info!("Logged in as: {}", outcome.profile.username);
    Ok(outcome)
}

fn login_outcome(username: &str, response: LoginResponse) -> LoginOutcome {
    let profile = response.user.unwrap_or_else(|| UserProfile {
        username: username.to_string(),
        ..UserProfile::default()
    });

    LoginOutcome {
        profile,
        token: response.token.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_only_response_keeps_typed_username() {
        let response: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        let outcome = login_outcome("alice", response);
        assert_eq!(outcome.profile.username, "alice");
        assert_eq!(outcome.token, "abc");
    }
}
