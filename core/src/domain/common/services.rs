use std::sync::Arc;

use crate::domain::{ingredient::ports::TermListRepository, label_analysis::ports::LLMClient};

/// Generic service holding every outbound port. Domain services are
/// implemented on it in their own modules.
pub struct Service<LLM, TL>
where
    LLM: LLMClient,
    TL: TermListRepository,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) term_list_repository: Arc<TL>,
    pub(crate) max_image_edge: u32,
}

impl<LLM, TL> Service<LLM, TL>
where
    LLM: LLMClient,
    TL: TermListRepository,
{
    pub fn new(llm_client: LLM, term_list_repository: TL, max_image_edge: u32) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            term_list_repository: Arc::new(term_list_repository),
            max_image_edge,
        }
    }
}

impl<LLM, TL> Clone for Service<LLM, TL>
where
    LLM: LLMClient,
    TL: TermListRepository,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            term_list_repository: Arc::clone(&self.term_list_repository),
            max_image_edge: self.max_image_edge,
        }
    }
}
