use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token pair issued by the authentication endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Token {
    #[serde(rename = "tokenType")]
    pub token_type: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// The refresh endpoint answers with the same envelope as login.
pub type RefreshResponse = LoginResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_uses_camel_case_wire_names() {
        let token: Token = serde_json::from_value(json!({
            "tokenType": "bearer",
            "accessToken": "a",
            "refreshToken": "r"
        }))
        .unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({"tokenType": "bearer", "accessToken": "a", "refreshToken": "r"})
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let request = LoginRequest {
            email: "user@example.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }
}
