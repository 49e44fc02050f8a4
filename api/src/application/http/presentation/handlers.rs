pub mod analyze_form;
pub mod index;
