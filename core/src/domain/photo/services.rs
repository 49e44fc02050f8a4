//! Downsampling of uploaded photos before they are forwarded to the model.
//!
//! The longest edge is bounded (800 px by default) and the shorter edge is
//! scaled by the same factor. The output keeps the input MIME type. Any
//! failure hands back the original blob: a photo that cannot be shrunk is
//! still worth sending.

use std::io::Cursor;

use image::{
    DynamicImage, ImageDecoder, ImageFormat, ImageReader, codecs::jpeg::JpegEncoder,
    imageops::FilterType, metadata::Orientation,
};
use tracing::{debug, warn};

use crate::domain::photo::{entities::ImageBlob, errors::NormalizeError};

const JPEG_QUALITY: u8 = 92;

/// Normalize `blob` so its longest edge is at most `max_edge`.
///
/// Never fails: on any decode or encode error the input is returned as-is.
pub fn normalize_image(blob: ImageBlob, max_edge: u32) -> ImageBlob {
    match try_normalize_image(&blob, max_edge) {
        Ok(Some(resized)) => {
            debug!(
                filename = %blob.filename,
                before = blob.len(),
                after = resized.len(),
                "image downsampled"
            );
            resized
        }
        Ok(None) => blob,
        Err(e) => {
            warn!(
                filename = %blob.filename,
                mime_type = %blob.mime_type,
                error = %e,
                "image normalization failed, forwarding original"
            );
            blob
        }
    }
}

/// Fallible core of [`normalize_image`].
///
/// EXIF orientation is applied before measuring, so the bound holds for the
/// upright image. Returns `Ok(None)` when the image already fits upright and
/// needs no re-encode.
pub fn try_normalize_image(
    blob: &ImageBlob,
    max_edge: u32,
) -> Result<Option<ImageBlob>, NormalizeError> {
    let format = format_from_mime(&blob.mime_type)
        .ok_or_else(|| NormalizeError::UnsupportedFormat(blob.mime_type.clone()))?;

    let (mut decoded, orientation) = decode_with_orientation(&blob.bytes, format)?;

    // The re-encoded output carries no EXIF, so rotation has to be baked in.
    let rotated = orientation != Orientation::NoTransforms;
    decoded.apply_orientation(orientation);

    let target = scaled_dimensions(decoded.width(), decoded.height(), max_edge);
    let output = match target {
        Some((width, height)) => decoded.resize_exact(width, height, FilterType::Lanczos3),
        None if rotated => decoded,
        None => return Ok(None),
    };

    let bytes = encode(&output, format)?;
    if bytes.is_empty() {
        return Err(NormalizeError::EmptyOutput);
    }

    Ok(Some(ImageBlob {
        bytes,
        mime_type: blob.mime_type.clone(),
        filename: blob.filename.clone(),
    }))
}

/// Target dimensions for a `width`×`height` image bounded by `max_edge`, or
/// `None` when it already fits.
pub fn scaled_dimensions(width: u32, height: u32, max_edge: u32) -> Option<(u32, u32)> {
    if width >= height && width > max_edge {
        Some((max_edge, scale_edge(height, max_edge, width)))
    } else if height > max_edge {
        Some((scale_edge(width, max_edge, height), max_edge))
    } else {
        None
    }
}

fn scale_edge(edge: u32, target: u32, longest: u32) -> u32 {
    let scaled = (f64::from(edge) * f64::from(target) / f64::from(longest)).round() as u32;
    scaled.max(1)
}

fn decode_with_orientation(
    bytes: &[u8],
    format: ImageFormat,
) -> Result<(DynamicImage, Orientation), NormalizeError> {
    let mut decoder = ImageReader::with_format(Cursor::new(bytes), format)
        .into_decoder()
        .map_err(NormalizeError::Decode)?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let image = DynamicImage::from_decoder(decoder).map_err(NormalizeError::Decode)?;
    Ok((image, orientation))
}

fn format_from_mime(mime_type: &str) -> Option<ImageFormat> {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    match mime_type.as_str() {
        "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
        other => ImageFormat::from_mime_type(other),
    }
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, NormalizeError> {
    let mut buf = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            // JPEG has no alpha channel
            let rgb = if img.color().has_alpha() {
                DynamicImage::ImageRgb8(img.to_rgb8())
            } else {
                img.clone()
            };
            rgb.write_with_encoder(encoder)
                .map_err(NormalizeError::Encode)?;
        }
        _ => img
            .write_to(&mut Cursor::new(&mut buf), format)
            .map_err(NormalizeError::Encode)?,
    }

    Ok(buf)
}
