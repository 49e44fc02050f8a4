pub mod llm;
pub mod term_list;
