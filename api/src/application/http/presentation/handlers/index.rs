use axum::{extract::State, response::Html};

use crate::application::http::{
    presentation::{render::render_page, view::ViewState},
    server::app_state::AppState,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&ViewState::Idle, &state.args.server.root_path))
}
