use serde::{Deserialize, Serialize};

/// Form-encoded login request (password grant)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub grant_type: String,
    /// The account email
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub id_token: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String, id_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            id_token,
        }
    }
}
