//! Application ports (hexagonal architecture boundaries)
//!
//! Outbound ports to services outside the database live here.

pub mod geocoder;

pub use geocoder::{DisabledGeocoder, Geocoder, SharedGeocoder};
