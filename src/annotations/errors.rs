use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error("Failed to load annotations: {0}")]
    ReadFailure(String),

    /// Displays as the backend's own message, which is what the user gets to see.
    #[error("{0}")]
    WriteFailure(String),
}

pub type Result<T> = std::result::Result<T, AnnotationError>;
