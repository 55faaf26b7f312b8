//! Response DTOs for the HTTP API.

use serde::Serialize;

use crate::db::{City, Country};

/// Who-am-I response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Username of the logged-in user.
    pub username: String,
}

/// A city's share of its country's population.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// The city.
    pub city: City,
    /// The country the city belongs to.
    pub country: Country,
    /// Percentage of the country's population living in the city.
    pub share_percent: Option<f64>,
}
