//! Outbound port for address geocoding
//!
//! [`Geocoder`] decouples the organization service from the concrete lookup
//! backend. The production implementation is
//! [`NominatimGeocoder`](crate::infrastructure::geocoding::NominatimGeocoder).

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Coordinates;

/// Forward geocoding: free-form address to coordinates.
///
/// Lookups are best effort. Implementations swallow and log their own
/// failures and return `None`, so a record write never fails because the
/// geocoder is down.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Option<Coordinates>;
}

pub type SharedGeocoder = Arc<dyn Geocoder>;

/// Geocoder used when lookups are switched off in configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn geocode(&self, _address: &str) -> Option<Coordinates> {
        None
    }
}
