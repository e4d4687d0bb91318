use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so keep exactly one and never recycle it.
        let pool = if db_path.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let repo = Self { pool };

        repo.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }
}

fn parse_timestamp(s: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::Decode(format!("modified timestamp {:?}: {}", s, e)))
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn list_movie_ids(&self, offset: u64, limit: Option<u64>) -> DbResult<Vec<i64>> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let results = sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM movies ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(results.into_iter().map(|r| r.0).collect())
    }

    async fn get_movie(&self, id: i64) -> DbResult<Movie> {
        let result = sqlx::query_as::<_, (i64, String, i64, String)>(
            "SELECT id, title, year, modified FROM movies WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound(format!("Movie not found: {}", id)),
            _ => DbError::Sqlx(e),
        })?;

        Ok(Movie {
            id: result.0,
            title: result.1,
            year: result.2,
            modified: parse_timestamp(&result.3)?,
        })
    }

    async fn count_movies(&self) -> DbResult<u64> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn create_movie(&self, movie: &NewMovie) -> DbResult<Movie> {
        let modified = Utc::now().trunc_subsecs(6);

        let result = sqlx::query("INSERT INTO movies (title, year, modified) VALUES (?, ?, ?)")
            .bind(&movie.title)
            .bind(movie.year)
            .bind(modified.to_rfc3339_opts(SecondsFormat::Micros, true))
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Inserted movie row");

        Ok(Movie {
            id,
            title: movie.title.clone(),
            year: movie.year,
            modified,
        })
    }

    async fn delete_movie(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn close(&self) {
        self.pool.close().await;
        info!("Database closed");
    }
}
