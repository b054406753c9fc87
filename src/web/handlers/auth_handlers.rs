use axum::{extract::State, response::Json, Form};

use crate::auth::password;
use crate::models::{LoginRequest, TokenResponse};
use crate::web::responses::AppError;
use crate::web::router::AppState;

/// Password-grant login. Returns a bearer access token plus an id token
/// that additionally carries the email claim. Unknown accounts and wrong
/// passwords are indistinguishable to the client.
pub async fn login(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if request.grant_type != "password" {
        return Err(AppError::violation("unsupportedGrantType"));
    }

    let account = state
        .accounts
        .find_by_email(&request.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password::verify_password(&request.password, &account.password_hash) {
        tracing::debug!("Password mismatch for account {}", account.id);
        return Err(AppError::Unauthorized);
    }

    let access_token = state.token_keys.sign(account.id, None)?;
    let id_token = state.token_keys.sign(account.id, Some(account.email))?;

    Ok(Json(TokenResponse::bearer(access_token, id_token)))
}
