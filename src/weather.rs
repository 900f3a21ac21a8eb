//! Weather API client for OpenWeatherMap current conditions
//!
//! A lookup that reaches the service always yields a [`WeatherOutcome`]:
//! anything other than a well-formed `cod == 200` payload is `NotFound`.
//! Only transport failures are reported as errors.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::weather::capitalize;
use crate::models::{WeatherOutcome, WeatherReading};
use crate::{Result, WeatherMapError};

/// Unit system requested from the API
const UNITS: &str = "metric";

/// Source of current weather readings
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherOutcome>;
}

/// Client for the OpenWeatherMap `weather` endpoint
pub struct OpenWeatherClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("WeatherMap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherMapError::config(format!("Failed to create HTTP client: {e}")))?;

        if config.api_key.is_none() {
            warn!("No weather API key configured; weather lookups will be rejected");
        }

        Ok(Self {
            client,
            endpoint: format!("{}/weather", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherOutcome> {
        let start_time = Instant::now();
        debug!(endpoint = %self.endpoint, "Requesting current weather");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", UNITS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let outcome = parse_current_weather(&body);

        match &outcome {
            WeatherOutcome::Found(reading) => info!(
                name = %reading.name,
                country = %reading.country,
                "Retrieved current weather in {:.3}s",
                start_time.elapsed().as_secs_f64()
            ),
            WeatherOutcome::NotFound => {
                warn!(%status, "No weather data for {:.4}, {:.4}", lat, lon)
            }
        }

        Ok(outcome)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default = "unknown_name")]
    name: String,
    sys: SystemInfo,
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct SystemInfo {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

/// Interpret a raw `weather` response body.
///
/// Success requires a numeric `cod` of 200 and every field the reading needs.
pub fn parse_current_weather(body: &str) -> WeatherOutcome {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return WeatherOutcome::NotFound;
    };

    if value.get("cod").and_then(Value::as_i64) != Some(200) {
        return WeatherOutcome::NotFound;
    }

    let Ok(response) = serde_json::from_value::<CurrentWeatherResponse>(value) else {
        return WeatherOutcome::NotFound;
    };

    let Some(condition) = response.weather.first() else {
        return WeatherOutcome::NotFound;
    };

    WeatherOutcome::Found(WeatherReading {
        name: response.name,
        country: response.sys.country,
        description: capitalize(&condition.description),
        temperature: response.main.temp,
    })
}
