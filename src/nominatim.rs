//! Nominatim HTTP adapter for address resolution.
//!
//! Works against any Nominatim-compatible geocoding endpoint. The first
//! candidate wins; an empty candidate list is `NotFound`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::traits::{AddressResolver, ResolveError};
use crate::waypoint::Coordinate;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "route-planner/0.2".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl AddressResolver for NominatimClient {
    async fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        let url = format!("{}/search", self.config.base_url);

        let response = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| ResolveError::Transient(err.to_string()))?;

        let candidates: Vec<SearchCandidate> = response
            .json()
            .await
            .map_err(|err| ResolveError::Transient(err.to_string()))?;

        let first = candidates.into_iter().next().ok_or(ResolveError::NotFound)?;

        let latitude = first
            .lat
            .parse()
            .map_err(|_| ResolveError::Transient(format!("bad latitude: {}", first.lat)))?;
        let longitude = first
            .lon
            .parse()
            .map_err(|_| ResolveError::Transient(format!("bad longitude: {}", first.lon)))?;

        Ok(Coordinate::new(latitude, longitude))
    }
}

// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchCandidate {
    lat: String,
    lon: String,
}
