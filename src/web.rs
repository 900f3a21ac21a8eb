use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::{MapConfig, WeatherMapConfig};
use crate::location_resolver::{IpLocationClient, LocationProvider};
use crate::models::Coordinate;
use crate::shell::build_page;
use crate::weather::{OpenWeatherClient, WeatherProvider};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub locator: Arc<dyn LocationProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub map: Arc<MapConfig>,
}

impl AppState {
    /// Build the production clients from configuration
    pub fn from_config(config: &WeatherMapConfig) -> Result<Self> {
        Ok(Self {
            locator: Arc::new(IpLocationClient::new(&config.location)?),
            weather: Arc::new(OpenWeatherClient::new(&config.weather)?),
            map: Arc::new(config.map.clone()),
        })
    }
}

/// Click reported by the map, as raw query values
#[derive(Debug, Default, Deserialize)]
pub struct ClickQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl ClickQuery {
    /// The clicked point, if both values parse
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(self.lat.as_deref()?, self.lng.as_deref()?)
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .nest("/api", api::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>, Query(click): Query<ClickQuery>) -> Html<String> {
    let page = build_page(
        state.locator.as_ref(),
        state.weather.as_ref(),
        &state.map,
        click.coordinate(),
    )
    .await;
    Html(page.to_html())
}

pub async fn run(config: &WeatherMapConfig) -> Result<()> {
    let app = router(AppState::from_config(config)?);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
