use serde::{Deserialize, Serialize};

use super::common::{AccountId, CommentId, PostId};

/// Comment domain model, owned by one account and one product post
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub account_id: AccountId,
    pub post_id: PostId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub account_id: AccountId,
    pub post_id: PostId,
}

/// Partial update; the owning account and post are immutable
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<i64>,
    pub account_id: Option<AccountId>,
}

/// Full column set for insert and update
#[derive(Debug, Clone)]
pub struct CommentFields {
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub account_id: AccountId,
    pub post_id: PostId,
}

impl From<CreateCommentRequest> for CommentFields {
    fn from(request: CreateCommentRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            created_at: request.created_at,
            account_id: request.account_id,
            post_id: request.post_id,
        }
    }
}

impl Comment {
    /// Merge a partial update onto the stored row
    pub fn merged_with(&self, request: &UpdateCommentRequest) -> CommentFields {
        CommentFields {
            title: request.title.clone().unwrap_or_else(|| self.title.clone()),
            content: request.content.clone().unwrap_or_else(|| self.content.clone()),
            created_at: request.created_at.unwrap_or(self.created_at),
            account_id: self.account_id,
            post_id: self.post_id,
        }
    }
}
