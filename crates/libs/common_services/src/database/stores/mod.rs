pub mod collect_store;
pub mod comment_store;
pub mod follow_store;
pub mod notification_store;
pub mod outbox_store;
pub mod photo_store;
pub mod role_store;
pub mod tag_store;
pub mod user_store;
