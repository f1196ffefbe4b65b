mod api;
mod handles;

pub use api::*;
