//! Presentation Shell
//!
//! Runs one interaction: resolve the caller's location, show it on a world
//! map, and when the map reported a click, look up and show the weather at
//! that point.

use tracing::{debug, error, info};

use crate::config::MapConfig;
use crate::html::escape_html;
use crate::location_resolver::{LocationProvider, resolve_location};
use crate::map_view::{MAP_ASSETS, MAP_SCRIPT, MapHandle, MapView, Marker};
use crate::models::{Coordinate, LocationInfo, WeatherOutcome, WeatherReading};
use crate::weather::WeatherProvider;

pub const TITLE: &str = "🌍 Interactive Global Weather Map";
pub const PROMPT: &str = "Click on any location to view weather conditions";
pub const WEATHER_HEADING: &str = "Weather at Selected Location";
pub const NOT_FOUND_MESSAGE: &str = "Weather data not found for this point.";
const USER_MARKER_TOOLTIP: &str = "Your Location";

/// Progress of one interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Initial,
    LocationResolved,
    WeatherShown,
    WeatherError,
}

/// What the page shows below the map after a click
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherSection {
    Shown {
        reading: WeatherReading,
        /// Second render, centered on the clicked point
        map: MapHandle,
    },
    Error {
        message: String,
    },
}

/// Everything one request displays
#[derive(Debug, Clone)]
pub struct Page {
    pub location: LocationInfo,
    pub map: MapHandle,
    pub weather: Option<WeatherSection>,
    state: PageState,
}

impl Page {
    #[must_use]
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Status banner text
    #[must_use]
    pub fn status(&self) -> String {
        format!("You are near: {}", self.location.place_name())
    }

    /// All maps on the page in render order
    #[must_use]
    pub fn maps(&self) -> Vec<&MapHandle> {
        let mut maps = vec![&self.map];
        if let Some(WeatherSection::Shown { map, .. }) = &self.weather {
            maps.push(map);
        }
        maps
    }

    /// Render the complete HTML document
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut body = format!(
            "<h1>{}</h1>\n<div class=\"banner success\">📍 {}</div>\n<h3>🔍 {}</h3>\n",
            escape_html(TITLE),
            escape_html(&self.status()),
            escape_html(PROMPT),
        );
        body.push_str(&self.map.to_html());

        match &self.weather {
            Some(WeatherSection::Shown { reading, map }) => {
                body.push_str(&format!(
                    "<h2>📌 {}</h2>\n<ul class=\"summary\">\n<li><strong>Location</strong>: {}</li>\n<li><strong>Condition</strong>: {}</li>\n<li><strong>Temperature</strong>: {}</li>\n</ul>\n",
                    escape_html(WEATHER_HEADING),
                    escape_html(&reading.place_name()),
                    escape_html(&reading.description),
                    escape_html(&reading.format_temperature()),
                ));
                body.push_str(&map.to_html());
            }
            Some(WeatherSection::Error { message }) => {
                body.push_str(&format!(
                    "<div class=\"banner error\">{}</div>\n",
                    escape_html(message)
                ));
            }
            None => {}
        }

        format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n<title>{title}</title>\n{assets}\n<style>{style}</style>\n{script}\n</head>\n<body class=\"wide\">\n{body}</body>\n</html>\n",
            title = escape_html(TITLE),
            assets = MAP_ASSETS,
            style = STYLE,
            script = MAP_SCRIPT,
        )
    }
}

const STYLE: &str = "body.wide { margin: 0 auto; padding: 1rem 3rem; max-width: none; font-family: sans-serif; } \
.banner { padding: 0.75rem 1rem; border-radius: 0.5rem; margin: 1rem 0; } \
.banner.success { background: #e6f4ea; color: #1e4620; } \
.banner.error { background: #fdecea; color: #611a15; } \
.map { margin: 1rem 0; }";

/// Run one interaction and collect what the page should show
pub async fn build_page(
    locator: &dyn LocationProvider,
    weather: &dyn WeatherProvider,
    config: &MapConfig,
    click: Option<Coordinate>,
) -> Page {
    let mut state = PageState::Initial;
    debug!(?state, "Starting interaction");

    let location = resolve_location(locator).await;
    state = PageState::LocationResolved;
    debug!(?state, place = %location.place_name());

    let mut view = MapView::new(config, click);
    let user_marker = Marker::new(
        location.coordinate,
        USER_MARKER_TOOLTIP,
        location.place_name(),
    );
    let map = view.render(location.coordinate, Some(user_marker), config.world_zoom);

    let Some(clicked) = map.last_click() else {
        return Page {
            location,
            map,
            weather: None,
            state,
        };
    };

    info!(
        "Map clicked at {}, looking up weather",
        clicked.format_coordinates()
    );

    let section = match weather
        .fetch_weather(clicked.latitude, clicked.longitude)
        .await
    {
        Ok(WeatherOutcome::Found(reading)) => {
            state = PageState::WeatherShown;
            let marker = Marker::new(clicked, reading.place_name(), reading.summary());
            let map = view.render(clicked, Some(marker), config.regional_zoom);
            WeatherSection::Shown { reading, map }
        }
        Ok(WeatherOutcome::NotFound) => {
            state = PageState::WeatherError;
            WeatherSection::Error {
                message: NOT_FOUND_MESSAGE.to_string(),
            }
        }
        Err(e) => {
            state = PageState::WeatherError;
            error!(error = %e, "Weather lookup failed");
            WeatherSection::Error {
                message: e.user_message(),
            }
        }
    };
    debug!(?state, "Interaction finished");

    Page {
        location,
        map,
        weather: Some(section),
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Result, WeatherMapError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedLocation(Option<LocationInfo>);

    #[async_trait]
    impl LocationProvider for FixedLocation {
        async fn lookup(&self) -> Result<LocationInfo> {
            self.0
                .clone()
                .ok_or_else(|| WeatherMapError::api("unreachable"))
        }
    }

    enum Scripted {
        Reading(WeatherReading),
        NotFound,
        Transport,
    }

    struct ScriptedWeather {
        reply: Scripted,
        calls: AtomicUsize,
    }

    impl ScriptedWeather {
        fn new(reply: Scripted) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedWeather {
        async fn fetch_weather(&self, _lat: f64, _lon: f64) -> Result<WeatherOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Scripted::Reading(reading) => Ok(WeatherOutcome::Found(reading.clone())),
                Scripted::NotFound => Ok(WeatherOutcome::NotFound),
                Scripted::Transport => Err(WeatherMapError::api("timed out")),
            }
        }
    }

    fn london() -> FixedLocation {
        FixedLocation(Some(LocationInfo::new(
            Coordinate::new(51.5, -0.12),
            "London".to_string(),
            "GB".to_string(),
        )))
    }

    fn tokyo() -> WeatherReading {
        WeatherReading {
            name: "Tokyo".to_string(),
            country: "JP".to_string(),
            description: "Clear sky".to_string(),
            temperature: 18.5,
        }
    }

    #[tokio::test]
    async fn test_page_without_click() {
        let config = MapConfig::default();
        let weather = ScriptedWeather::new(Scripted::NotFound);
        let page = build_page(&london(), &weather, &config, None).await;

        assert_eq!(page.state(), PageState::LocationResolved);
        assert_eq!(page.status(), "You are near: London, GB");
        assert_eq!(page.map.center(), Coordinate::new(51.5, -0.12));
        assert_eq!(page.map.zoom(), 3);
        assert_eq!(page.map.marker().unwrap().tooltip, "Your Location");
        assert_eq!(page.map.marker().unwrap().popup, "London, GB");
        assert!(page.weather.is_none());
        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_page_with_unreachable_location() {
        let config = MapConfig::default();
        let weather = ScriptedWeather::new(Scripted::NotFound);
        let page = build_page(&FixedLocation(None), &weather, &config, None).await;

        assert_eq!(page.status(), "You are near: , ");
        assert_eq!(page.map.center(), Coordinate::new(20.0, 0.0));
    }

    #[tokio::test]
    async fn test_page_with_weather() {
        let config = MapConfig::default();
        let weather = ScriptedWeather::new(Scripted::Reading(tokyo()));
        let click = Coordinate::new(35.0, 139.0);
        let page = build_page(&london(), &weather, &config, Some(click)).await;

        assert_eq!(page.state(), PageState::WeatherShown);
        let Some(WeatherSection::Shown { reading, map }) = &page.weather else {
            panic!("expected weather to be shown");
        };
        assert_eq!(reading, &tokyo());
        assert_eq!(map.center(), click);
        assert_eq!(map.zoom(), 4);
        assert_eq!(map.marker().unwrap().tooltip, "Tokyo, JP");
        assert_eq!(map.marker().unwrap().popup, "Clear sky, 18.5°C");
        assert_eq!(page.maps().len(), 2);

        let html = page.to_html();
        assert!(html.contains("Tokyo, JP"));
        assert!(html.contains("Clear sky"));
        assert!(html.contains("18.5°C"));
        assert!(html.contains("id=\"map-1\""));
    }

    #[tokio::test]
    async fn test_page_with_missing_weather() {
        let config = MapConfig::default();
        let weather = ScriptedWeather::new(Scripted::NotFound);
        let page = build_page(&london(), &weather, &config, Some(Coordinate::new(0.0, -30.0))).await;

        assert_eq!(page.state(), PageState::WeatherError);
        assert_eq!(
            page.weather,
            Some(WeatherSection::Error {
                message: NOT_FOUND_MESSAGE.to_string()
            })
        );
        assert_eq!(page.maps().len(), 1);
        assert!(!page.to_html().contains("id=\"map-1\""));
    }

    #[tokio::test]
    async fn test_page_with_weather_transport_failure() {
        let config = MapConfig::default();
        let weather = ScriptedWeather::new(Scripted::Transport);
        let page = build_page(&london(), &weather, &config, Some(Coordinate::new(1.0, 1.0))).await;

        assert_eq!(page.state(), PageState::WeatherError);
        let Some(WeatherSection::Error { message }) = &page.weather else {
            panic!("expected an error section");
        };
        assert_ne!(message, NOT_FOUND_MESSAGE);
        assert!(message.contains("unavailable"));
        assert_eq!(page.maps().len(), 1);
    }
}
