pub mod ports;
pub mod services;

pub use ports::{DisabledGeocoder, Geocoder, SharedGeocoder};
pub use services::{OrganizationService, PoliceOfficerService, UserService};
