use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Render sink '{sink}' failed: {reason}")]
    Sink { sink: &'static str, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
