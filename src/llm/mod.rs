//! Commit message generation through an LLM chat completion API.

pub mod client;
pub mod prompt;

pub use client::{ChatClient, MessageGenerator};
pub use prompt::{Language, SYSTEM_PROMPT, build_commit_prompt};
