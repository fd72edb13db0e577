//! Organization aggregate
//!
//! Contains the Organization entity, DTOs, and repository interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreateOrganizationDto, NewOrganization, OrganizationChanges, UpdateOrganizationDto};
pub use model::{Coordinates, Organization};
pub use repository::OrganizationRepositoryInterface;
