use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    auth::TokenKeys,
    config::AppConfig,
    repository::{
        AccountRepository, CommentRepository, PostRepository, SqlxAccountRepository,
        SqlxCommentRepository, SqlxPostRepository,
    },
    validation::AccountRules,
    web::{
        handlers::{
            account_handlers, auth_handlers, comment_handlers, health_handlers, post_handlers,
        },
        middleware::request_id_middleware,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub token_keys: Arc<TokenKeys>,
    pub accounts: Arc<dyn AccountRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let token_keys = Arc::new(TokenKeys::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_hours,
        ));

        Self {
            token_keys,
            accounts: Arc::new(SqlxAccountRepository::new(pool.clone())),
            posts: Arc::new(SqlxPostRepository::new(pool.clone())),
            comments: Arc::new(SqlxCommentRepository::new(pool)),
            config: Arc::new(config),
        }
    }

    /// Account business rules derived from configuration
    pub fn account_rules(&self) -> AccountRules {
        AccountRules {
            allowed_email_domain: self.config.auth.allowed_email_domain.clone(),
            min_password_length: self.config.auth.min_password_length,
        }
    }
}

/// Custom request ID generator using UUID v4
#[derive(Clone, Default)]
pub struct UuidMakeRequestId;

impl MakeRequestId for UuidMakeRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let request_id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Create the main application router with middleware stack
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        .merge(account_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .route("/login", post(auth_handlers::login))
        .nest("/health", health_routes())
        .layer(
            ServiceBuilder::new()
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(SetRequestIdLayer::x_request_id(UuidMakeRequestId::default()))
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
        .fallback(not_found_handler)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            post(account_handlers::create_account).get(account_handlers::list_accounts),
        )
        .route(
            "/accounts/:id",
            get(account_handlers::get_account)
                .patch(account_handlers::update_account)
                .delete(account_handlers::delete_account),
        )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/productPosts",
            post(post_handlers::create_post).get(post_handlers::list_posts),
        )
        .route(
            "/productPosts/:id",
            get(post_handlers::get_post)
                .patch(post_handlers::update_post)
                .delete(post_handlers::delete_post),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            post(comment_handlers::create_comment).get(comment_handlers::list_comments),
        )
        .route(
            "/comments/:id",
            get(comment_handlers::get_comment)
                .patch(comment_handlers::update_comment)
                .delete(comment_handlers::delete_comment),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/live", get(health_handlers::liveness))
        .route("/ready", get(health_handlers::readiness))
        .route("/", get(health_handlers::health))
}

/// Fallback handler for 404 responses
pub async fn not_found_handler() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
