use uuid::Uuid;

/// Common ID types
pub type AccountId = Uuid;
pub type PostId = Uuid;
pub type CommentId = Uuid;
