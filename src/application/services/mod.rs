//! Application services, one per aggregate

pub mod organization;
pub mod police_officer;
pub mod user;

pub use organization::OrganizationService;
pub use police_officer::PoliceOfficerService;
pub use user::UserService;
