use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};

use crate::auth::{guard, password};
use crate::models::{
    Account, AccountFields, AccountId, CreateAccountRequest, UpdateAccountRequest,
};
use crate::validation::{validate_account, AccountCandidate};
use crate::web::extractors::Payload;
use crate::web::responses::AppError;
use crate::web::router::AppState;

/// Register a new account. This is the one mutating endpoint without an
/// authentication stage: no token can exist before the first account does.
pub async fn create_account(
    State(state): State<AppState>,
    Payload(request): Payload<CreateAccountRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Account>), AppError> {
    let candidate = AccountCandidate {
        email: &request.email,
        password: Some(&request.password),
        username: &request.username,
    };
    let violations = validate_account(&candidate, &state.account_rules());
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let fields = AccountFields {
        email: request.email,
        password_hash: password::hash_password(&request.password)?,
        username: request.username,
    };

    let account = state.accounts.insert(fields).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/accounts/{}", account.id))],
        Json(account),
    ))
}

/// Get an account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<Json<Account>, AppError> {
    let account = state.accounts.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(account))
}

/// List all accounts
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state.accounts.list().await?;
    Ok(Json(accounts))
}

/// Partially update an account; only its owner may do so
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    headers: HeaderMap,
    Payload(request): Payload<UpdateAccountRequest>,
) -> Result<StatusCode, AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;
    guard::authorize_owner(subject, id)?;

    let existing = state.accounts.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    let email = request.email.unwrap_or(existing.email);
    let username = request.username.unwrap_or(existing.username);

    let candidate = AccountCandidate {
        email: &email,
        password: request.password.as_deref(),
        username: &username,
    };
    let violations = validate_account(&candidate, &state.account_rules());
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let password_hash = match request.password {
        Some(plaintext) => password::hash_password(&plaintext)?,
        None => existing.password_hash,
    };

    state
        .accounts
        .update(id, AccountFields { email, password_hash, username })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an account; cascades to its posts and comments in the store
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let subject = guard::authenticate(&headers, &state.token_keys)?;
    guard::authorize_owner(subject, id)?;

    state.accounts.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
