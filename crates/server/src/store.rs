//! Poll persistence.
//!
//! PostgreSQL is used when `DATABASE_URL` is configured; otherwise polls live
//! in process memory and vanish on restart, which is enough for local runs
//! and tests.

use std::sync::Arc;

use chrono::Utc;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::AppError,
    models::{NewPoll, PollRow},
};

const POLL_COLUMNS: &str =
    "id, title, description, owner, options, color, randomize, protection, created_at";

#[derive(Clone)]
pub enum Store {
    Postgres(PgPool),
    Memory(Arc<RwLock<Vec<PollRow>>>),
}

impl Store {
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let Some(database_url) = &config.database_url else {
            warn!("DATABASE_URL not set, polls are kept in memory");
            return Ok(Self::memory());
        };

        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&db).await?;
        info!("Connected to database");

        Ok(Self::Postgres(db))
    }

    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Inserts the poll in one statement and returns it as stored.
    pub async fn create_poll(&self, poll: NewPoll) -> Result<PollRow, AppError> {
        match self {
            Store::Postgres(db) => {
                let row = sqlx::query_as::<_, PollRow>(&format!(
                    "INSERT INTO polls (title, description, owner, options, color, randomize, protection)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING {POLL_COLUMNS}"
                ))
                .bind(&poll.title)
                .bind(&poll.description)
                .bind(&poll.owner)
                .bind(&poll.options)
                .bind(poll.color.to_vec())
                .bind(poll.randomize)
                .bind(poll.protection.as_str())
                .fetch_one(db)
                .await?;

                Ok(row)
            }
            Store::Memory(polls) => {
                let mut polls = polls.write().await;
                let row = PollRow {
                    id: polls.len() as i32 + 1,
                    title: poll.title,
                    description: poll.description,
                    owner: poll.owner,
                    options: poll.options,
                    color: poll.color.to_vec(),
                    randomize: poll.randomize,
                    protection: poll.protection.to_string(),
                    created_at: Utc::now(),
                };
                polls.push(row.clone());

                Ok(row)
            }
        }
    }

    pub async fn get_poll(&self, id: i32) -> Result<Option<PollRow>, AppError> {
        match self {
            Store::Postgres(db) => {
                let row = sqlx::query_as::<_, PollRow>(&format!(
                    "SELECT {POLL_COLUMNS} FROM polls WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(db)
                .await?;

                Ok(row)
            }
            Store::Memory(polls) => Ok(polls.read().await.iter().find(|p| p.id == id).cloned()),
        }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        match self {
            Store::Postgres(db) => Ok(sqlx::query_scalar("SELECT COUNT(*) FROM polls")
                .fetch_one(db)
                .await?),
            Store::Memory(polls) => Ok(polls.read().await.len() as i64),
        }
    }

    /// Health check: `Some(reachable)` for a database, `None` in memory mode.
    pub async fn ping(&self) -> Option<bool> {
        match self {
            Store::Postgres(db) => Some(sqlx::query("SELECT 1").execute(db).await.is_ok()),
            Store::Memory(_) => None,
        }
    }
}
