//! JSON endpoints mirroring what the page shows

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::location_resolver::resolve_location;
use crate::models::{Coordinate, LocationInfo, WeatherOutcome, WeatherReading};
use crate::shell::NOT_FOUND_MESSAGE;
use crate::web::AppState;
use crate::WeatherMapError;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/location", get(get_location))
        .route("/weather", get(get_weather))
}

async fn get_location(State(state): State<AppState>) -> Json<LocationInfo> {
    Json(resolve_location(state.locator.as_ref()).await)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<WeatherReading> {
    let coordinate = match (query.lat.as_deref(), query.lon.as_deref()) {
        (Some(lat), Some(lon)) => Coordinate::parse(lat, lon),
        _ => None,
    }
    .ok_or_else(|| {
        let err = WeatherMapError::validation("lat and lon must both be numeric");
        api_error(StatusCode::BAD_REQUEST, err.user_message())
    })?;

    match state
        .weather
        .fetch_weather(coordinate.latitude, coordinate.longitude)
        .await
    {
        Ok(WeatherOutcome::Found(reading)) => Ok(Json(reading)),
        Ok(WeatherOutcome::NotFound) => Err(api_error(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)),
        Err(e) => {
            tracing::error!(error = %e, "Weather lookup failed");
            Err(api_error(StatusCode::BAD_GATEWAY, e.user_message()))
        }
    }
}
