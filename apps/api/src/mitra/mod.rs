pub mod backend;
pub mod handlers;
pub mod prompts;
