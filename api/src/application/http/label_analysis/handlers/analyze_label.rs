use axum::extract::{Multipart, State, multipart::MultipartRejection};
use foodlens_core::domain::{
    common::generate_uuid_v7,
    label_analysis::{
        entities::LabelAnalysis, ports::LabelAnalysisService, value_objects::AnalyzeLabelInput,
    },
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::application::http::{
    label_analysis::multipart::read_image,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorBody, ProcessingErrorBody},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeLabelResponse {
    /// Ingredient text read from the photo.
    pub ingredients: String,
    /// Free-form health analysis. May contain `**bold**` markers.
    pub analysis: String,
    /// Reference-list terms found in `ingredients`, in list order.
    pub found_unhealthy: Vec<String>,
}

impl From<LabelAnalysis> for AnalyzeLabelResponse {
    fn from(value: LabelAnalysis) -> Self {
        Self {
            ingredients: value.ingredients,
            analysis: value.analysis,
            found_unhealthy: value.found_unhealthy.into_inner(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "label-analysis",
    summary = "Analyze a food label photo",
    description = "Accepts a multipart form with an `image` file field. Extracts the ingredient list, flags unhealthy ingredients and returns a health analysis.",
    responses(
        (status = 200, body = AnalyzeLabelResponse),
        (status = 400, body = ErrorBody, description = "No image provided"),
        (status = 413, body = ErrorBody, description = "Upload too large"),
        (status = 500, body = ProcessingErrorBody, description = "Extraction or analysis failed"),
    ),
)]
pub async fn analyze_label(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let image = read_image(multipart).await?;
    let request_id = generate_uuid_v7();

    if let Some(image) = &image {
        info!(
            %request_id,
            filename = %image.filename,
            mime_type = %image.mime_type,
            bytes = image.len(),
            "Received label photo"
        );
    }

    let result = state
        .service
        .analyze_label(AnalyzeLabelInput { request_id, image })
        .await
        .map_err(|e| ApiError::from_analysis(e, state.diagnostics()))?;

    Ok(Response::OK(result.into()))
}
