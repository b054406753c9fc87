pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod router;

pub use router::{create_router, AppState};
