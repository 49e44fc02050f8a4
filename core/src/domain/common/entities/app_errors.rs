use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The request carried no image to analyze.
    #[error("No image file provided")]
    MissingImage,

    /// The external model call failed: network, auth, quota or an
    /// unreadable response body.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// A static resource (the term list) could not be read.
    #[error("Resource load error: {0}")]
    ResourceLoadError(String),

    #[error("Internal server error")]
    InternalServerError,
}
