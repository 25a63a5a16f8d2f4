use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("{algorithm} key must be {expected} bytes, got {actual}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("worker task failed: {0}")]
    Task(String),
}

pub type CipherResult<T> = Result<T, CipherError>;

impl CipherError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CipherError::InvalidArgument(message.into())
    }
}
