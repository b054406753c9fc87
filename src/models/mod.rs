pub mod account;
pub mod auth;
pub mod comment;
pub mod common;
pub mod product_post;

pub use account::*;
pub use auth::*;
pub use comment::*;
pub use common::*;
pub use product_post::*;
