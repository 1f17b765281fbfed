use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                "INTERNAL_SERVER_ERROR"
            }
        };

        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}
