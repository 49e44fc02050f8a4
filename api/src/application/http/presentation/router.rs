use super::handlers::{analyze_form::analyze_form, index::index};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn presentation_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    let index_path = if root_path.is_empty() {
        "/".to_string()
    } else {
        root_path.clone()
    };

    Router::new()
        .route(&index_path, get(index))
        .route(&format!("{}/analyze", root_path), post(analyze_form))
}
