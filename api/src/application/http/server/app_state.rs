use std::sync::Arc;

use foodlens_core::application::FoodLensService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FoodLensService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FoodLensService) -> Self {
        Self { args, service }
    }

    /// Whether 500 responses carry diagnostic detail, and what they report
    /// about the credential.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            expose: self.args.analysis.expose_error_details,
            api_key_configured: self.args.llm.has_api_key(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub expose: bool,
    pub api_key_configured: bool,
}
