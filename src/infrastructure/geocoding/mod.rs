//! Geocoding adapters

pub mod nominatim;

pub use nominatim::{GeocodeError, NominatimGeocoder, NominatimSettings};
