use super::handlers::analyze_label::{__path_analyze_label, analyze_label};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_label))]
pub struct LabelAnalysisApiDoc;

pub fn label_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/analyze", state.args.server.root_path),
        post(analyze_label),
    )
}
