use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::Html,
};
use foodlens_core::domain::{
    common::generate_uuid_v7,
    label_analysis::{ports::LabelAnalysisService, value_objects::AnalyzeLabelInput},
};

use crate::application::http::{
    label_analysis::multipart::read_image,
    presentation::{
        render::render_page,
        view::{ViewEvent, ViewState},
    },
    server::{api_entities::api_error::ApiError, app_state::AppState},
};

/// Form post used when the page runs without script. Drives the same view
/// states the browser walks through and renders the outcome server-side.
pub async fn analyze_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Html<String>) {
    let root_path = state.args.server.root_path.clone();
    let page = |status: StatusCode, view: &ViewState| (status, Html(render_page(view, &root_path)));

    let image = match read_image(multipart).await {
        Ok(image) => image,
        Err(e) => {
            let view = ViewState::Failed {
                filename: None,
                message: e.display_message(),
            };
            return page(e.status(), &view);
        }
    };

    let view = match &image {
        Some(image) => ViewState::Idle.apply(ViewEvent::FileSelected {
            filename: image.filename.clone(),
        }),
        None => ViewState::Idle,
    };
    let view = view.apply(ViewEvent::Submitted);
    if !view.is_loading() {
        return page(StatusCode::BAD_REQUEST, &view);
    }

    let outcome = state
        .service
        .analyze_label(AnalyzeLabelInput {
            request_id: generate_uuid_v7(),
            image,
        })
        .await;

    match outcome {
        Ok(analysis) => page(
            StatusCode::OK,
            &view.apply(ViewEvent::ResponseReceived(analysis)),
        ),
        Err(e) => {
            let error = ApiError::from_analysis(e, state.diagnostics());
            let status = error.status();
            page(
                status,
                &view.apply(ViewEvent::RequestFailed(error.display_message())),
            )
        }
    }
}
