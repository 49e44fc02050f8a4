use std::sync::Arc;

use crate::application::http::health::{HealthApiDoc, health_routes};
use crate::application::http::label_analysis::router::{
    LabelAnalysisApiDoc, label_analysis_routes,
};
use crate::application::http::presentation::router::presentation_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use foodlens_core::{application::create_service, domain::common::FoodLensConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = FoodLensConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    if !args.llm.has_api_key() {
        warn!("GEMINI_API_KEY is not set; analysis requests will fail until it is configured");
    }

    Ok(AppState::new(args, service))
}

/// The merged OpenAPI document, with every path prefixed by `root_path`.
pub fn openapi(root_path: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(LabelAnalysisApiDoc::openapi());
    openapi.merge(HealthApiDoc::openapi());

    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    openapi.paths = paths;
    openapi
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid allowed origin");
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT]);

    let root_path = state.args.server.root_path.clone();
    let api_doc = openapi(&root_path);

    let mut router = axum::Router::new()
        .route(
            &format!("{}/api-docs/openapi.json", root_path),
            get(move || async move { Json(api_doc) }),
        )
        .merge(label_analysis_routes(state.clone()))
        .merge(presentation_routes(state.clone()))
        .merge(health_routes(&root_path));

    if state.args.server.metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route(
                &format!("{}/metrics", root_path),
                get(|| async move { metric_handle.render() }),
            )
            .layer(prometheus_layer);
    }

    let router = router
        .layer(DefaultBodyLimit::max(state.args.server.max_upload_bytes))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}
