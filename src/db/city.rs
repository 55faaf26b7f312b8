//! City model and repository.

use serde::Serialize;
use sqlx::SqlitePool;

use super::country::Country;
use crate::{Result, WorldError};

/// A city row. Text and population columns are nullable in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Row ID.
    pub id: i64,
    /// City name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO 3166-1 alpha-3 code of the country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// District / prefecture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Population.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
}

impl City {
    /// Percentage of the country's population living in this city.
    ///
    /// Returns `None` if either population is unknown or the country
    /// population is zero.
    pub fn population_share(&self, country: &Country) -> Option<f64> {
        let population = self.population?;
        if country.population <= 0 {
            return None;
        }
        Some(population as f64 / country.population as f64 * 100.0)
    }
}

/// Data for inserting a new city.
#[derive(Debug, Clone, Default)]
pub struct NewCity {
    /// City name.
    pub name: Option<String>,
    /// Country code.
    pub country_code: Option<String>,
    /// District.
    pub district: Option<String>,
    /// Population.
    pub population: Option<i64>,
}

/// Repository for city reads and inserts.
pub struct CityRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CityRepository<'a> {
    /// Create a new CityRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a city by exact name.
    ///
    /// When several cities share a name the one with the lowest ID wins.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<City>> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, country_code, district, population
             FROM city WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(city)
    }

    /// Get a city by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<City>> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, country_code, district, population FROM city WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(city)
    }

    /// Insert a city and return it with its assigned ID.
    pub async fn insert(&self, new_city: &NewCity) -> Result<City> {
        let result = sqlx::query(
            "INSERT INTO city (name, country_code, district, population) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_city.name)
        .bind(&new_city.country_code)
        .bind(&new_city.district)
        .bind(new_city.population)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WorldError::NotFound("city".to_string()))
    }

    /// List cities of a country, most populous first.
    pub async fn list_by_country(&self, country_code: &str) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT id, name, country_code, district, population
             FROM city WHERE country_code = ?
             ORDER BY population DESC, id",
        )
        .bind(country_code)
        .fetch_all(self.pool)
        .await?;

        Ok(cities)
    }
}
