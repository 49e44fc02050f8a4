use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    label_analysis::{entities::LabelAnalysis, value_objects::AnalyzeLabelInput},
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the label analysis pipeline
#[cfg_attr(test, mockall::automock)]
pub trait LabelAnalysisService: Send + Sync {
    fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;
}
