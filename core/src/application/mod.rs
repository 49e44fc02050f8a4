use crate::{
    domain::common::{FoodLensConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::GeminiLLMClient, term_list::FileTermListRepository},
};

pub type FoodLensService = Service<GeminiLLMClient, FileTermListRepository>;

pub fn create_service(config: FoodLensConfig) -> Result<FoodLensService, CoreError> {
    let llm_client = GeminiLLMClient::new(
        config.llm.gemini_api_key,
        config.llm.gemini_model,
        config.llm.gemini_base_url,
    )?;
    let term_list_repository = FileTermListRepository::new(config.analysis.term_list_path);

    Ok(Service::new(
        llm_client,
        term_list_repository,
        config.analysis.max_image_edge,
    ))
}
