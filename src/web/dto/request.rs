//! Request DTOs for the HTTP API.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::validation::{country_code, non_negative, not_empty_trimmed};
use crate::db::NewCity;

/// Signup and login request.
///
/// Missing fields read as empty strings and are rejected by the auth
/// service, not by the JSON layer.
#[derive(Deserialize)]
pub struct AuthRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// City insert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCityRequest {
    /// City name.
    pub name: String,
    /// Country code.
    #[serde(default)]
    pub country_code: Option<String>,
    /// District.
    #[serde(default)]
    pub district: Option<String>,
    /// Population.
    #[serde(default)]
    pub population: Option<i64>,
}

impl Validate for NewCityRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = not_empty_trimmed(&self.name) {
            errors.add("name", e);
        }
        if let Some(code) = &self.country_code {
            if let Err(e) = country_code(code) {
                errors.add("countryCode", e);
            }
        }
        if let Some(population) = self.population {
            if let Err(e) = non_negative(population) {
                errors.add("population", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<NewCityRequest> for NewCity {
    fn from(req: NewCityRequest) -> Self {
        NewCity {
            name: Some(req.name.trim().to_string()),
            country_code: req.country_code,
            district: req.district,
            population: req.population,
        }
    }
}
