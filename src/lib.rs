//! # CopShop Records
//!
//! Record management for police organizations, police officers and users.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: services and outbound ports (geocoding)
//! - **infrastructure**: SeaORM persistence, Nominatim client, in-memory tables
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: pagination, validation and shutdown helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export the pagination helper
pub use shared::{paginate, PageQuery, PageRequest, PageResult, PageSource};
