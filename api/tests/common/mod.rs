#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_test::TestServer;
use base64::{Engine as _, engine::general_purpose};
use clap::Parser;
use foodlens_api::application::http::server::http_server::{router, state};
use foodlens_api::args::Args;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

pub const INGREDIENTS: &str = "Ingredients: Water, Sugar, Salt";
pub const ANALYSIS: &str = "**Moderate** sugar content.\nEnjoy occasionally.";

/// What the fake model saw on each image call.
#[derive(Debug, Default)]
pub struct Seen {
    pub image_dimensions: Vec<(u32, u32)>,
    pub text_prompts: Vec<String>,
}

#[derive(Clone)]
struct StubState {
    fail: bool,
    seen: Arc<Mutex<Seen>>,
}

fn gemini_reply(text: &str) -> Json<Value> {
    Json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

async fn generate(
    State(stub): State<StubState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if stub.fail {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            "quota exceeded".to_string(),
        ));
    }

    let parts = body["contents"][0]["parts"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    let inline = parts
        .iter()
        .find_map(|part| part["inline_data"]["data"].as_str());

    match inline {
        Some(data) => {
            let bytes = general_purpose::STANDARD.decode(data).unwrap();
            let dims = image::load_from_memory(&bytes).unwrap().dimensions();
            stub.seen.lock().unwrap().image_dimensions.push(dims);
            Ok(gemini_reply(INGREDIENTS))
        }
        None => {
            let prompt = parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<String>();
            stub.seen.lock().unwrap().text_prompts.push(prompt);
            Ok(gemini_reply(ANALYSIS))
        }
    }
}

/// Spawn a local stand-in for the Gemini API and return its base URL.
pub async fn spawn_gemini(fail: bool) -> (String, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let app = Router::new()
        .route("/v1beta/models/{model}", post(generate))
        .with_state(StubState {
            fail,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

pub fn term_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

pub async fn test_server(base_url: &str, term_path: &str, extra: &[&str]) -> TestServer {
    let mut argv = vec![
        "foodlens-api",
        "--gemini-api-key",
        "test-key",
        "--gemini-base-url",
        base_url,
        "--term-list-path",
        term_path,
    ];
    argv.extend_from_slice(extra);

    let args = Arc::new(Args::parse_from(argv));
    let app_state = state(args).await.unwrap();
    TestServer::new(router(app_state).unwrap()).unwrap()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
