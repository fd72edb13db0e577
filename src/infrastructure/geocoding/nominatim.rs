//! OpenStreetMap Nominatim client
//!
//! Forward geocoding through `GET {base_url}/search?q=..&format=json&limit=1`.
//! Nominatim's usage policy allows one request per second and requires an
//! identifying User-Agent, both enforced here.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::Geocoder;
use crate::domain::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "CopShop-App/1.0";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}")]
    Api(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct NominatimSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum spacing between two outgoing requests
    pub min_interval: Duration,
}

impl Default for NominatimSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            min_interval: Duration::from_millis(1000),
        }
    }
}

/// One hit of a `/search` response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Spaces requests at least `min_interval` apart
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// First hit of a `/search` response, `None` when nothing matched.
fn first_place(places: Vec<Place>) -> Option<Coordinates> {
    places.into_iter().next().map(|place| Coordinates {
        latitude: place.lat,
        longitude: place.lon,
    })
}

pub struct NominatimGeocoder {
    http_client: reqwest::Client,
    search_url: String,
    rate_limiter: RateLimiter,
}

impl NominatimGeocoder {
    pub fn new(settings: NominatimSettings) -> Result<Self, GeocodeError> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            search_url: format!("{}/search", settings.base_url.trim_end_matches('/')),
            rate_limiter: RateLimiter::new(settings.min_interval),
        })
    }

    /// Look up `address`, reporting failures to the caller.
    pub async fn search(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self.rate_limiter.wait().await;

        debug!(address = %address, "Querying Nominatim");

        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Api(status.as_u16()));
        }

        let places: Vec<Place> = response.json().await.map_err(|e| {
            if e.is_decode() {
                GeocodeError::Parse(e.to_string())
            } else {
                GeocodeError::Network(e.to_string())
            }
        })?;

        Ok(first_place(places))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Option<Coordinates> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        match self.search(address).await {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                debug!(address = %address, "No geocoding match");
                None
            }
            Err(e) => {
                warn!(address = %address, error = %e, "Forward geocoding failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves `body` as the JSON response of `/search` on an ephemeral port.
    async fn stub_nominatim(body: &'static str) -> String {
        use axum::routing::get;

        let app = axum::Router::new().route(
            "/search",
            get(move || async move { ([("content-type", "application/json")], body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn geocoder_for(base_url: String) -> NominatimGeocoder {
        NominatimGeocoder::new(NominatimSettings {
            base_url,
            timeout: Duration::from_secs(5),
            min_interval: Duration::ZERO,
            ..NominatimSettings::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn first_place_wins() {
        let base_url = stub_nominatim(
            r#"[
                {"place_id": 1, "lat": "51.5033635", "lon": "-0.1276248", "display_name": "10 Downing Street"},
                {"place_id": 2, "lat": "0", "lon": "0"}
            ]"#,
        )
        .await;

        assert_eq!(
            geocoder_for(base_url).search("10 Downing Street").await.unwrap(),
            Some(Coordinates {
                latitude: "51.5033635".into(),
                longitude: "-0.1276248".into(),
            })
        );
    }

    #[tokio::test]
    async fn empty_result_is_no_match() {
        let base_url = stub_nominatim("[]").await;
        let geocoder = geocoder_for(base_url);

        assert_eq!(geocoder.search("Atlantis").await.unwrap(), None);
        assert!(geocoder.geocode("Atlantis").await.is_none());
    }

    #[tokio::test]
    async fn unexpected_body_is_a_parse_error() {
        let base_url = stub_nominatim(r#"{"error": "Unable to geocode"}"#).await;

        let err = geocoder_for(base_url).search("???").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Parse(_)));
    }

    #[test]
    fn search_url_ignores_trailing_slash() {
        let geocoder = NominatimGeocoder::new(NominatimSettings {
            base_url: "http://localhost:8080/".into(),
            ..NominatimSettings::default()
        })
        .unwrap();
        assert_eq!(geocoder.search_url, "http://localhost:8080/search");
    }

    #[tokio::test]
    async fn rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        let start = Instant::now();

        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));

        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn blank_address_skips_the_lookup() {
        let geocoder = NominatimGeocoder::new(NominatimSettings::default()).unwrap();
        assert!(geocoder.geocode("   ").await.is_none());
        assert!(geocoder.rate_limiter.last_request.lock().await.is_none());
    }

    #[tokio::test]
    async fn unreachable_service_yields_none() {
        let geocoder = NominatimGeocoder::new(NominatimSettings {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(2),
            min_interval: Duration::ZERO,
            ..NominatimSettings::default()
        })
        .unwrap();

        assert!(geocoder.geocode("221B Baker Street").await.is_none());
        assert!(matches!(
            geocoder.search("221B Baker Street").await,
            Err(GeocodeError::Network(_))
        ));
    }
}
