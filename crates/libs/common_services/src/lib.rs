#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]

pub mod api;
pub mod database;
pub mod images;
pub mod outbox;
mod utils;

pub use utils::*;
