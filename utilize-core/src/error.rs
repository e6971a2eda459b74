use thiserror::Error;

pub type UtilizeResult<T> = Result<T, UtilizeError>;

/// Errors surfaced by the helper components.
///
/// `Transport` failures are produced by webhook and image calls. Callers in
/// this workspace log and drop them; they never reach a command handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtilizeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Precondition(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl UtilizeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    pub fn transport(source: impl std::fmt::Display) -> Self {
        Self::Transport(source.to_string())
    }
}
