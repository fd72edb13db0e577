//! Database entities module

pub mod organization;
pub mod police_officer;
pub mod user;

pub use organization::Entity as Organization;
pub use police_officer::Entity as PoliceOfficer;
pub use user::Entity as User;
