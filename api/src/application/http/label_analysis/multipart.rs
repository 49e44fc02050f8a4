use axum::{
    extract::{
        Multipart,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use foodlens_core::domain::photo::entities::ImageBlob;
use tracing::debug;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Form field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

const DEFAULT_FILENAME: &str = "upload";

/// Pull the photo out of a request body that may not be multipart at all.
///
/// A body the multipart extractor rejects (missing body, wrong content type,
/// no boundary) carries no image, so it yields `None` and the caller reports
/// the missing image like any other.
pub async fn read_image(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Option<ImageBlob>, ApiError> {
    match multipart {
        Ok(mut multipart) => read_image_field(&mut multipart).await,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Request body is not a multipart form");
            Ok(None)
        }
    }
}

/// Pull the `image` part out of a multipart body.
///
/// An absent field and an empty file part both yield `None`; browsers send
/// the latter when a form is submitted without a selection. Other fields are
/// ignored.
pub async fn read_image_field(multipart: &mut Multipart) -> Result<Option<ImageBlob>, ApiError> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read image", e))?;

        if data.is_empty() {
            continue;
        }

        if !mime_type.starts_with("image/") {
            return Err(ApiError::BadRequest(
                "Only image files are allowed".to_string(),
            ));
        }

        image = Some(ImageBlob::new(data.to_vec(), mime_type, filename));
    }

    Ok(image)
}

fn multipart_error(context: &str, error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string())
    } else {
        ApiError::BadRequest(format!("{}: {}", context, error.body_text()))
    }
}
