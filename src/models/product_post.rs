use serde::{Deserialize, Serialize};

use super::common::{AccountId, PostId};

/// Product listing domain model
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductPost {
    pub id: PostId,
    pub title: String,
    pub price: i64,
    pub category: String,
    pub content: String,
    /// Client-supplied epoch seconds; listings are ordered newest first
    pub created_at: i64,
    pub account_id: AccountId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPostRequest {
    pub title: String,
    pub price: i64,
    pub category: String,
    pub content: String,
    pub created_at: i64,
    pub account_id: AccountId,
}

/// Partial update; absent fields keep their stored values. A differing
/// `accountId` is rejected before this ever reaches the store.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPostRequest {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<i64>,
    pub account_id: Option<AccountId>,
}

/// Full column set for insert and update, and the candidate the validator
/// checks for both create and merged partial updates
#[derive(Debug, Clone)]
pub struct ProductPostFields {
    pub title: String,
    pub price: i64,
    pub category: String,
    pub content: String,
    pub created_at: i64,
    pub account_id: AccountId,
}

impl From<CreateProductPostRequest> for ProductPostFields {
    fn from(request: CreateProductPostRequest) -> Self {
        Self {
            title: request.title,
            price: request.price,
            category: request.category,
            content: request.content,
            created_at: request.created_at,
            account_id: request.account_id,
        }
    }
}

impl ProductPost {
    /// Merge a partial update onto the stored row
    pub fn merged_with(&self, request: &UpdateProductPostRequest) -> ProductPostFields {
        ProductPostFields {
            title: request.title.clone().unwrap_or_else(|| self.title.clone()),
            price: request.price.unwrap_or(self.price),
            category: request.category.clone().unwrap_or_else(|| self.category.clone()),
            content: request.content.clone().unwrap_or_else(|| self.content.clone()),
            created_at: request.created_at.unwrap_or(self.created_at),
            account_id: self.account_id,
        }
    }
}
