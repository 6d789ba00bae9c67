mod derive;

pub use derive::*;
