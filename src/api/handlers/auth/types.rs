//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of an account, returned by register and login.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// Decoded session claims, returned by the profile endpoint.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn register_request_round_trips() -> Result<()> {
        let request = RegisterRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        let value = serde_json::to_value(&request)?;
        let username = value
            .get("username")
            .and_then(serde_json::Value::as_str)
            .context("missing username")?;
        assert_eq!(username, "alice");
        let decoded: RegisterRequest = serde_json::from_value(value)?;
        assert_eq!(decoded.password, "pw1");
        Ok(())
    }

    #[test]
    fn user_response_round_trips() -> Result<()> {
        let response = UserResponse {
            id: "0ab9e437-34a2-44c4-bf32-1b5e431878a7".to_string(),
            username: "bob".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        let decoded: UserResponse = serde_json::from_value(value)?;
        assert_eq!(decoded.id, response.id);
        assert_eq!(decoded.username, "bob");
        Ok(())
    }
}
