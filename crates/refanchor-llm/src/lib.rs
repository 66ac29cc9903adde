//! # refanchor-llm
//!
//! Drafts formulas with a language model behind an OpenAI-compatible
//! `/chat/completions` endpoint. [`LlmDrafter`] plugs into
//! [`refanchor_translate::DraftingStrategy`].
//!
//! Calls are blocking; the batch driver processes one instruction at a time.

pub mod client;
pub mod config;
pub mod drafter;
pub mod error;
pub mod prompt;

pub use client::LlmClient;
pub use config::LlmConfig;
pub use drafter::LlmDrafter;
pub use error::{LlmError, LlmResult};
pub use prompt::{formula_prompt, SYSTEM_PROMPT};
