//! City handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::db::{City, CityRepository, CountryRepository, NewCity};
use crate::web::dto::{NewCityRequest, ShareResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthenticatedIdentity;

use super::AppState;

/// GET /cities/:name - Look up a city by name.
pub async fn get_city(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<City>, ApiError> {
    let city = CityRepository::new(state.db.pool())
        .get_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("city '{}' not found", name)))?;

    Ok(Json(city))
}

/// POST /cities - Insert a city.
pub async fn create_city(
    State(state): State<Arc<AppState>>,
    identity: AuthenticatedIdentity,
    ValidatedJson(req): ValidatedJson<NewCityRequest>,
) -> Result<(StatusCode, Json<City>), ApiError> {
    let city = CityRepository::new(state.db.pool())
        .insert(&NewCity::from(req))
        .await?;

    tracing::info!(
        username = %identity.username(),
        city_id = city.id,
        "City inserted"
    );
    Ok((StatusCode::CREATED, Json(city)))
}

/// GET /cities/:name/share - The city's share of its country's population.
pub async fn city_share(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ShareResponse>, ApiError> {
    let city = CityRepository::new(state.db.pool())
        .get_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("city '{}' not found", name)))?;

    let code = city
        .country_code
        .as_deref()
        .ok_or_else(|| ApiError::not_found(format!("city '{}' has no country", name)))?;

    let country = CountryRepository::new(state.db.pool())
        .get_by_code(code)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("country '{}' not found", code)))?;

    let share_percent = city.population_share(&country);
    if let Some(share) = share_percent {
        tracing::debug!(city = %name, country = %country.code, "Population share {:.2}%", share);
    }

    Ok(Json(ShareResponse {
        city,
        country,
        share_percent,
    }))
}
