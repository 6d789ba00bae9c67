mod emails;
mod transport;
mod worker;

pub use emails::*;
pub use transport::*;
pub use worker::*;
