// Prompt generation: template catalogue, the generate flow and its HTTP handler.
// All downstream calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod templates;
