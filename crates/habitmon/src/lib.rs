pub mod chart;
pub mod config;
pub mod creature;
pub mod habits;
pub mod http;
pub mod llm;
pub mod render;
pub mod report;
pub mod session;
pub mod weather;
