pub mod account_handlers;
pub mod auth_handlers;
pub mod comment_handlers;
pub mod health_handlers;
pub mod post_handlers;
