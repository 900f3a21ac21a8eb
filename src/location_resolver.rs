//! Location Resolution Module
//!
//! Looks up the caller's approximate position through an IP geolocation
//! service. The lookup itself reports failures; [`resolve_location`] is the
//! policy that turns any failure into the fixed default location.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::LocationConfig;
use crate::models::{Coordinate, LocationInfo};
use crate::{Result, WeatherMapError};

/// Source of the caller's location
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn lookup(&self) -> Result<LocationInfo>;
}

/// Resolve the caller's location, falling back to
/// [`LocationInfo::fallback`] on any lookup failure.
pub async fn resolve_location(provider: &dyn LocationProvider) -> LocationInfo {
    match provider.lookup().await {
        Ok(location) => location,
        Err(e) => {
            warn!(error = %e, "geolocation failed; using default location");
            LocationInfo::fallback()
        }
    }
}

/// Raw ipinfo-style payload
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    loc: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl TryFrom<IpLookupResponse> for LocationInfo {
    type Error = WeatherMapError;

    fn try_from(response: IpLookupResponse) -> Result<Self> {
        let coordinate = Coordinate::parse_combined(&response.loc).ok_or_else(|| {
            WeatherMapError::parse(format!("invalid loc field: {:?}", response.loc))
        })?;
        Ok(LocationInfo::new(
            coordinate,
            response.city.unwrap_or_default(),
            response.country.unwrap_or_default(),
        ))
    }
}

/// Client for ipinfo.io compatible services
pub struct IpLocationClient {
    client: Client,
    url: String,
}

impl IpLocationClient {
    pub fn new(config: &LocationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("WeatherMap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherMapError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl LocationProvider for IpLocationClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn lookup(&self) -> Result<LocationInfo> {
        debug!("Requesting IP geolocation");

        let response = self.client.get(&self.url).send().await?;
        let body = response.text().await?;
        let payload: IpLookupResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherMapError::parse(format!("geolocation payload: {e}")))?;
        let location = LocationInfo::try_from(payload)?;

        info!(
            lat = location.coordinate.latitude,
            lon = location.coordinate.longitude,
            city = %location.city,
            country = %location.country,
            "geolocation resolution successful"
        );

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl LocationProvider for FailingProvider {
        async fn lookup(&self) -> Result<LocationInfo> {
            Err(WeatherMapError::api("connection refused"))
        }
    }

    struct FixedProvider(LocationInfo);

    #[async_trait]
    impl LocationProvider for FixedProvider {
        async fn lookup(&self) -> Result<LocationInfo> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_resolve_location_falls_back() {
        let location = resolve_location(&FailingProvider).await;
        assert_eq!(location, LocationInfo::fallback());
    }

    #[tokio::test]
    async fn test_resolve_location_passes_through() {
        let expected = LocationInfo::new(
            Coordinate::new(51.5, -0.12),
            "London".to_string(),
            "GB".to_string(),
        );
        let provider = FixedProvider(expected.clone());
        assert_eq!(resolve_location(&provider).await, expected);
    }

    #[test]
    fn test_payload_without_city_or_country() {
        let payload: IpLookupResponse = serde_json::from_str(r#"{"loc": "1.5,2.5"}"#).unwrap();
        let location = LocationInfo::try_from(payload).unwrap();
        assert_eq!(location.coordinate, Coordinate::new(1.5, 2.5));
        assert_eq!(location.city, "");
        assert_eq!(location.country, "");
    }

    #[test]
    fn test_payload_with_bad_loc() {
        let payload: IpLookupResponse =
            serde_json::from_str(r#"{"loc": "somewhere", "city": "X"}"#).unwrap();
        let err = LocationInfo::try_from(payload).unwrap_err();
        assert!(matches!(err, WeatherMapError::Parse { .. }));
    }
}
