//! Domain layer: record types, DTOs and repository interfaces

pub mod organization;
pub mod police_officer;
pub mod user;

pub use organization::{
    Coordinates, CreateOrganizationDto, NewOrganization, Organization, OrganizationChanges,
    OrganizationRepositoryInterface, UpdateOrganizationDto,
};
pub use police_officer::{
    CreatePoliceOfficerDto, PoliceOfficer, PoliceOfficerDetail,
    PoliceOfficerRepositoryInterface, UpdatePoliceOfficerDto, VerificationStatus,
};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface, UserRole};

pub use crate::shared::{DomainError, DomainResult, PageRequest, PageResult};
