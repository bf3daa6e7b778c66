pub mod api;
pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod session;
