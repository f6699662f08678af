use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize session report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid engine state: {0}")]
    InvalidState(String),
    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
