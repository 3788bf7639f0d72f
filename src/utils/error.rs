use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not connected to Redis")]
    NotConnected,

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}

pub type AppResult<T> = Result<T, AppError>;
