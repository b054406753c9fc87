use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::web::responses::AppError;

/// JSON payload extractor enforcing the shape-check stage: the body must be
/// a structured object with every required field present and of the
/// expected primitive type. Any deserialization failure is a 422, before
/// business validation ever runs.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(AppError::MalformedPayload(rejection.body_text())),
        }
    }
}
