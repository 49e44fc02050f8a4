use thiserror::Error;

/// Why a blob could not be normalized. Never surfaced to callers of
/// [`normalize_image`](super::services::normalize_image); it only feeds logs.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("unsupported image type '{0}'")]
    UnsupportedFormat(String),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("encoder produced no output")]
    EmptyOutput,
}
