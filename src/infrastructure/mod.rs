//! Infrastructure layer - external concerns

pub mod database;
pub mod geocoding;
pub mod storage;

pub use database::{init_database, DatabaseConfig, EntityTable};
pub use geocoding::{NominatimGeocoder, NominatimSettings};
pub use storage::MemoryTable;
