use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),
    #[error("invalid policy line {line}: {reason}")]
    InvalidRule { line: usize, reason: String },
    #[error("casbin error: {0}")]
    Casbin(#[from] casbin::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AuthzResult<T> = Result<T, AuthzError>;
