use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser};
use foodlens_core::{
    domain::common::{AnalysisConfig, FoodLensConfig, LLMConfig},
    infrastructure::llm::gemini_client::DEFAULT_GEMINI_BASE_URL,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "foodlens-api",
    version,
    about = "Reads ingredient lists from food package photos and flags unhealthy ingredients"
)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/foodlens`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Largest accepted request body.
    #[arg(long = "max-upload-bytes", env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Serve Prometheus metrics on `{root}/metrics`.
    #[arg(long = "metrics", env = "METRICS_ENABLED")]
    pub metrics: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    /// Missing keys do not stop the server; analysis requests fail instead.
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = DEFAULT_GEMINI_BASE_URL
    )]
    pub gemini_base_url: String,
}

impl LlmArgs {
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AnalysisArgs {
    /// Newline-delimited unhealthy ingredient terms, relative to the working directory.
    #[arg(
        long = "term-list-path",
        env = "TERM_LIST_PATH",
        default_value = "unhealthy_ingredients.txt"
    )]
    pub term_list_path: PathBuf,

    #[arg(long = "max-image-edge", env = "MAX_IMAGE_EDGE", default_value_t = 800)]
    pub max_image_edge: u32,

    /// Include error details, error chain and credential presence in 500 responses.
    #[arg(
        long = "expose-error-details",
        env = "EXPOSE_ERROR_DETAILS",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub expose_error_details: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for FoodLensConfig {
    fn from(args: Args) -> Self {
        FoodLensConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            analysis: AnalysisConfig {
                term_list_path: args.analysis.term_list_path,
                max_image_edge: args.analysis.max_image_edge,
            },
        }
    }
}
