use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};

use crate::auth::guard;
use crate::models::{
    CreateProductPostRequest, PostId, ProductPost, ProductPostFields, UpdateProductPostRequest,
};
use crate::validation::validate_product_post;
use crate::web::extractors::Payload;
use crate::web::responses::AppError;
use crate::web::router::AppState;

/// Create a product post. The claimed owner is the payload's own accountId;
/// it must match the authenticated subject.
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(request): Payload<CreateProductPostRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ProductPost>), AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;
    guard::authorize_owner(subject, request.account_id)?;

    let fields = ProductPostFields::from(request);
    let violations = validate_product_post(&fields);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let post = state.posts.insert(fields).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/productPosts/{}", post.id))],
        Json(post),
    ))
}

/// Get a product post by ID
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<ProductPost>, AppError> {
    let post = state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// List all product posts, newest first
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<ProductPost>>, AppError> {
    let posts = state.posts.list().await?;
    Ok(Json(posts))
}

/// Partially update a product post. The stored owner is looked up and
/// compared against the subject; the request body is never trusted for
/// ownership, and the owning account cannot be reassigned.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    headers: HeaderMap,
    Payload(request): Payload<UpdateProductPostRequest>,
) -> Result<StatusCode, AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;

    let existing = state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    guard::authorize_owner(subject, existing.account_id)?;

    if let Some(claimed_owner) = request.account_id {
        guard::authorize_owner(claimed_owner, existing.account_id)?;
    }

    let merged = existing.merged_with(&request);
    let violations = validate_product_post(&merged);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    state.posts.update(id, merged).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product post; only its owner may do so
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;

    let existing = state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    guard::authorize_owner(subject, existing.account_id)?;

    state.posts.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
