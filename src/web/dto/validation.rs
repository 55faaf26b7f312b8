//! JSON extractors and validators for request bodies.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor whose rejections are [`ApiError::bad_request`].
///
/// axum's own `Json` answers 415/422 for some malformed bodies; every body
/// problem is a 400 here.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        Ok(JsonBody(value))
    }
}

/// A JSON extractor that also validates the request body.
///
/// Field errors are returned as a 400 with per-field details.
///
/// ```ignore
/// async fn create_city(
///     ValidatedJson(payload): ValidatedJson<NewCityRequest>,
/// ) -> Result<Json<City>, ApiError> {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Validate an ISO 3166-1 alpha-3 country code (three ASCII capitals).
pub fn country_code(value: &str) -> Result<(), validator::ValidationError> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(validator::ValidationError::new("country_code")
            .with_message("Must be three upper-case letters".into()));
    }
    Ok(())
}

/// Validate that a count is not negative.
pub fn non_negative(value: i64) -> Result<(), validator::ValidationError> {
    if value < 0 {
        return Err(validator::ValidationError::new("non_negative")
            .with_message("Must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_trimmed() {
        assert!(not_empty_trimmed("Tokyo").is_ok());
        assert!(not_empty_trimmed("  Tokyo  ").is_ok());
        assert!(not_empty_trimmed("").is_err());
        assert!(not_empty_trimmed(" \t\n").is_err());
    }

    #[test]
    fn test_country_code() {
        assert!(country_code("JPN").is_ok());
        assert!(country_code("jpn").is_err());
        assert!(country_code("JP").is_err());
        assert!(country_code("JPNX").is_err());
        assert!(country_code("J1N").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(non_negative(0).is_ok());
        assert!(non_negative(42).is_ok());
        assert!(non_negative(-1).is_err());
    }
}
