pub mod common;
pub mod ingredient;
pub mod label_analysis;
pub mod photo;
