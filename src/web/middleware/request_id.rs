use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// Middleware to generate and propagate correlation IDs
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get("x-request-id")
        .and_then(|header| header.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert("x-request-id", header_value);
    }

    response
}
