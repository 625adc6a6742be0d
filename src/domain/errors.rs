use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Carries the entity name, e.g. `"User"`.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
