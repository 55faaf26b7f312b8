//! Country model and repository.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::Result;

/// A country row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code.
    pub code: String,
    /// Country name.
    pub name: String,
    /// Population.
    pub population: i64,
}

/// Repository for country reads and inserts.
pub struct CountryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CountryRepository<'a> {
    /// Create a new CountryRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a country by code.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Country>> {
        let country = sqlx::query_as::<_, Country>(
            "SELECT code, name, population FROM country WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(country)
    }

    /// Insert a country. A duplicate code is a `WorldError::Conflict`.
    pub async fn insert(&self, country: &Country) -> Result<()> {
        sqlx::query("INSERT INTO country (code, name, population) VALUES (?, ?, ?)")
            .bind(&country.code)
            .bind(&country.name)
            .bind(country.population)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// List all countries ordered by code.
    pub async fn list_all(&self) -> Result<Vec<Country>> {
        let countries = sqlx::query_as::<_, Country>(
            "SELECT code, name, population FROM country ORDER BY code",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }
}
