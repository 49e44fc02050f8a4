pub mod health;
pub mod label_analysis;
pub mod presentation;
pub mod server;
