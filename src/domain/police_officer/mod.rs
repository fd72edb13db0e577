//! Police officer aggregate

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreatePoliceOfficerDto, UpdatePoliceOfficerDto};
pub use model::{PoliceOfficer, PoliceOfficerDetail, VerificationStatus};
pub use repository::PoliceOfficerRepositoryInterface;
