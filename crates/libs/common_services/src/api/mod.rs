pub mod admin;
pub mod auth;
pub mod comments;
pub mod notifications;
pub mod pagination;
pub mod photos;
pub mod search;
pub mod social;
pub mod users;
