//! [`FormulaDrafter`] backed by the chat-completions client

use refanchor_translate::{Analysis, FormulaDrafter};

use crate::client::LlmClient;
use crate::config::LlmConfig;
use crate::error::{LlmError, LlmResult};
use crate::prompt::formula_prompt;

/// Drafts formulas by asking a language model
pub struct LlmDrafter {
    client: LlmClient,
    model: String,
}

impl LlmDrafter {
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let model = config.model.clone();
        Ok(Self {
            client: LlmClient::new(config)?,
            model,
        })
    }

    /// Drafter configured from the environment (see [`LlmConfig::from_env`])
    pub fn from_env() -> LlmResult<Self> {
        Self::new(LlmConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl FormulaDrafter for LlmDrafter {
    type Error = LlmError;

    fn draft(&mut self, analysis: &Analysis) -> LlmResult<String> {
        let prompt = formula_prompt(&analysis.text, &analysis.references);
        let answer = self.client.complete(&prompt, &self.model)?;
        Ok(strip_code_fence(&answer).to_string())
    }
}

/// Models sometimes wrap the formula in a Markdown code block
fn strip_code_fence(answer: &str) -> &str {
    let trimmed = answer.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed.trim_matches('`').trim();
    };
    // Drop the language tag line ("```excel")
    let inner = match inner.split_once('\n') {
        Some((_, rest)) => rest,
        None => inner,
    };
    inner.trim_end().trim_end_matches("```").trim()
}
