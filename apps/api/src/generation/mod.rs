// Cover letter generation: input sanitizing, prompt, reply parsing,
// filename derivation and the orchestrating flow.
// All model calls go through llm_client::TextGenerator.

pub mod filename;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod reply_parser;
pub mod sanitize;
