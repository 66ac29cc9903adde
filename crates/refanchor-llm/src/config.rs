//! Language-model configuration

use std::time::Duration;

use crate::error::{LlmError, LlmResult};

/// Model used unless configured otherwise
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the chat-completions endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl LlmConfig {
    /// Config with default settings for the given key
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.2,
            max_tokens: 500,
            timeout: Duration::from_secs(60),
        }
    }

    /// Read the key from `REFANCHOR_OPENAI_KEY`, then `OPENAI_API_KEY`, and
    /// an alternative endpoint from `REFANCHOR_OPENAI_BASE_URL`
    pub fn from_env() -> LlmResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`LlmConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> LlmResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("REFANCHOR_OPENAI_KEY")
            .or_else(|| non_empty("OPENAI_API_KEY"))
            .ok_or(LlmError::MissingKey)?;

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = non_empty("REFANCHOR_OPENAI_BASE_URL") {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Use a different model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Full chat-completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
