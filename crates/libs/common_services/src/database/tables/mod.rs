pub mod app_user;
pub mod collect;
pub mod comment;
pub mod follow;
pub mod notification;
pub mod outbox_email;
pub mod photo;
pub mod role;
pub mod tag;
