use async_graphql::{ID, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use shared::{Protection, Rgb, normalize};

use crate::error::AppError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PollRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub options: Vec<String>,
    pub color: Vec<i32>,
    pub randomize: bool,
    pub protection: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Poll {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<ID>,
    pub options: Vec<String>,
    pub color: Vec<i32>,
    pub randomize: bool,
    pub protection: String,
    pub created_at: DateTime<Utc>,
}

impl From<PollRow> for Poll {
    fn from(row: PollRow) -> Self {
        Self {
            id: ID::from(row.id.to_string()),
            title: row.title,
            description: row.description,
            owner: row.owner.map(ID::from),
            options: row.options,
            color: row.color,
            randomize: row.randomize,
            protection: row.protection,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreatePollInput {
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<ID>,
    pub options: Vec<String>,
    pub color: Vec<i32>,
    pub randomize: bool,
    pub protection: String,
}

/// A poll that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoll {
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub options: Vec<String>,
    pub color: Rgb,
    pub randomize: bool,
    pub protection: Protection,
}

impl TryFrom<CreatePollInput> for NewPoll {
    type Error = AppError;

    fn try_from(input: CreatePollInput) -> Result<Self, Self::Error> {
        if input.title.trim().is_empty() {
            return Err(AppError::BadRequest("Poll title is required".into()));
        }

        // Clients normalize too, but nothing stops a raw request.
        let options = normalize(&input.options);
        if options.is_empty() {
            return Err(AppError::BadRequest(
                "At least one non-blank option is required".into(),
            ));
        }

        let color: Rgb = input.color.as_slice().try_into().map_err(|_| {
            AppError::BadRequest("Color must have exactly three components".into())
        })?;

        let protection = input
            .protection
            .parse::<Protection>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self {
            title: input.title,
            description: input.description,
            owner: input.owner.map(|owner| owner.to_string()),
            options,
            color,
            randomize: input.randomize,
            protection,
        })
    }
}
