use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub const DEFAULT_MAX_IMAGE_EDGE: u32 = 800;

#[derive(Clone, Debug)]
pub struct FoodLensConfig {
    pub llm: LLMConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    /// `None` keeps the process bootable; calls fail at request time instead.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub term_list_path: PathBuf,
    pub max_image_edge: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            term_list_path: PathBuf::from("unhealthy_ingredients.txt"),
            max_image_edge: DEFAULT_MAX_IMAGE_EDGE,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
