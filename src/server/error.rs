use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("No record for user: {0}")]
    NotFound(String),

    #[error("Record already exists for user: {0}")]
    DuplicateKey(String),

    #[error("Joke fetch failed: {0}")]
    Fetch(String),

    #[error("Send API call failed: {0}")]
    Send(String),
}
