//! Organizations module: CRUD plus address geocoding

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
