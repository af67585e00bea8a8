//! Generation pipeline: turns a campaign into marketing copy and a visual
//! by calling an external generative collaborator.

pub mod client;
pub mod openai;
pub mod pipeline;
pub mod prompts;
pub mod scripted;

pub use client::{ChatMessage, GenerativeClient, Role};
pub use openai::OpenAiClient;
pub use pipeline::GenerationPipeline;
pub use scripted::ScriptedClient;
