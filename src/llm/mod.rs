//! Language-model integration: the completion client and prompt templates

pub mod client;
pub mod prompts;

pub use client::{CompletionClient, TextGenerator};
