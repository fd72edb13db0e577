//! Database repository implementations
//!
//! One SeaORM repository per aggregate. List reads go through the shared
//! [`paginate`](crate::shared::paginate) helper over an
//! [`EntityTable`](super::EntityTable).

pub mod organization_repository;
pub mod police_officer_repository;
pub mod user_repository;

pub use organization_repository::OrganizationRepository;
pub use police_officer_repository::PoliceOfficerRepository;
pub use user_repository::UserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Like [`db_err`], but reports unique-constraint violations as conflicts.
pub(crate) fn conflict_or_db_err(e: DbErr, conflict: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(conflict.to_string()),
        _ => db_err(e),
    }
}
