use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use serde::Deserialize;

use crate::auth::guard;
use crate::models::{
    Comment, CommentFields, CommentId, CreateCommentRequest, PostId, UpdateCommentRequest,
};
use crate::validation::validate_comment;
use crate::web::extractors::Payload;
use crate::web::responses::AppError;
use crate::web::router::AppState;

/// Query parameters for listing comments
#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    #[serde(rename = "postId")]
    pub post_id: Option<PostId>,
}

/// Create a comment; the authoring accountId must match the subject
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(request): Payload<CreateCommentRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Comment>), AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;
    guard::authorize_owner(subject, request.account_id)?;

    let fields = CommentFields::from(request);
    let violations = validate_comment(&fields);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let comment = state.comments.insert(fields).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/comments/{}", comment.id))],
        Json(comment),
    ))
}

/// Get a comment by ID
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> Result<Json<Comment>, AppError> {
    let comment = state.comments.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(comment))
}

/// List comments newest first, optionally filtered by post
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state.comments.list(query.post_id).await?;
    Ok(Json(comments))
}

/// Partially update a comment; only its author may do so, and authorship
/// cannot be reassigned
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
    headers: HeaderMap,
    Payload(request): Payload<UpdateCommentRequest>,
) -> Result<StatusCode, AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;

    let existing = state.comments.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    guard::authorize_owner(subject, existing.account_id)?;

    if let Some(claimed_owner) = request.account_id {
        guard::authorize_owner(claimed_owner, existing.account_id)?;
    }

    let merged = existing.merged_with(&request);
    let violations = validate_comment(&merged);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    state.comments.update(id, merged).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a comment; only its author may do so
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;

    let existing = state.comments.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    guard::authorize_owner(subject, existing.account_id)?;

    state.comments.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
