//! Postgres persistence for the `people` table.
//!
//! The table is expected to exist already; see `sql/people.sql`.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;
use crate::models::{DatabaseConfig, ResolvedCharacter};
use crate::storage::CharacterSink;

const INSERT_PERSON: &str = "INSERT INTO people (
    id, birth_year, eye_color, films, gender, hair_color, height, homeworld,
    mass, name, skin_color, species, starships, vehicles
) VALUES (
    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14
)";

/// Plain-insert writer over a shared connection pool.
///
/// There is no upsert: rerunning against a populated table fails every
/// insert on the primary key.
#[derive(Clone)]
pub struct PostgresWriter {
    pool: PgPool,
}

impl PostgresWriter {
    /// Open a pool using `config` and verify the server is reachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CharacterSink for PostgresWriter {
    async fn insert(&self, record: &ResolvedCharacter) -> Result<()> {
        sqlx::query(INSERT_PERSON)
            .bind(record.id)
            .bind(&record.birth_year)
            .bind(&record.eye_color)
            .bind(&record.films)
            .bind(&record.gender)
            .bind(&record.hair_color)
            .bind(&record.height)
            .bind(&record.homeworld)
            .bind(&record.mass)
            .bind(&record.name)
            .bind(&record.skin_color)
            .bind(&record.species)
            .bind(&record.starships)
            .bind(&record.vehicles)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_binds_fourteen_columns() {
        let placeholders = (1..=14).filter(|i| INSERT_PERSON.contains(&format!("${i}"))).count();
        assert_eq!(placeholders, 14);
        assert!(!INSERT_PERSON.contains("$15"));
        assert!(!INSERT_PERSON.to_uppercase().contains("ON CONFLICT"));
    }
}
