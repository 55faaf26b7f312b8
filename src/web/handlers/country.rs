//! Country handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::{City, CityRepository, Country, CountryRepository};
use crate::web::error::ApiError;

use super::AppState;

/// GET /countries - All countries ordered by code.
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Country>>, ApiError> {
    let countries = CountryRepository::new(state.db.pool()).list_all().await?;
    Ok(Json(countries))
}

/// GET /countries/:code - Look up a country by code.
pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Country>, ApiError> {
    let country = CountryRepository::new(state.db.pool())
        .get_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("country '{}' not found", code)))?;

    Ok(Json(country))
}

/// GET /countries/:code/cities - Cities of a country, most populous first.
pub async fn country_cities(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Vec<City>>, ApiError> {
    if CountryRepository::new(state.db.pool())
        .get_by_code(&code)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found(format!("country '{}' not found", code)));
    }

    let cities = CityRepository::new(state.db.pool())
        .list_by_country(&code)
        .await?;
    Ok(Json(cities))
}
