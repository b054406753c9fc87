use serde::{Deserialize, Serialize};

use super::common::AccountId;

/// Account domain model. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub username: String,
}

/// Registration payload. `hashedPassword` is the wire name existing clients
/// send; the value is the plaintext credential and is hashed server-side
/// after the length check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email: String,
    #[serde(rename = "hashedPassword")]
    pub password: String,
    pub username: String,
}

/// Partial account update; absent fields keep their stored values
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    #[serde(rename = "hashedPassword")]
    pub password: Option<String>,
    pub username: Option<String>,
}

/// Full column set for insert and update
#[derive(Debug, Clone)]
pub struct AccountFields {
    pub email: String,
    pub password_hash: String,
    pub username: String,
}
