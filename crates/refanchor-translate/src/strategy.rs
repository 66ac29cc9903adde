//! Formula strategies
//!
//! A run uses exactly one strategy. [`TemplateStrategy`] is deterministic;
//! [`DraftingStrategy`] hands each instruction to a [`FormulaDrafter`] such as
//! a language model and takes whatever it answers.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::analysis::Analysis;
use crate::synthesize::{ensure_formula_prefix, quote_literal, synthesize};

/// Turns an analyzed instruction into formula text
pub trait FormulaStrategy {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Formula for one instruction. Always starts with `=`; never fails.
    fn formula(&mut self, analysis: &Analysis) -> String;
}

/// Built-in templates, see [`synthesize`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateStrategy;

impl FormulaStrategy for TemplateStrategy {
    fn name(&self) -> &'static str {
        "template"
    }

    fn formula(&mut self, analysis: &Analysis) -> String {
        synthesize(
            &analysis.text,
            analysis.archetype,
            &analysis.references,
            &analysis.triples,
        )
    }
}

/// Something that drafts formula text for an instruction, e.g. a language model
pub trait FormulaDrafter {
    type Error: fmt::Display;

    /// Draft a formula for an instruction that has at least one reference
    fn draft(&mut self, analysis: &Analysis) -> Result<String, Self::Error>;
}

/// Options for drafting runs
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Pause after every drafter call
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
        }
    }
}

/// Strategy that asks a [`FormulaDrafter`]
pub struct DraftingStrategy<D> {
    drafter: D,
    options: BatchOptions,
}

impl<D: FormulaDrafter> DraftingStrategy<D> {
    /// Create a strategy with the default 100 ms delay
    pub fn new(drafter: D) -> Self {
        Self::with_options(drafter, BatchOptions::default())
    }

    pub fn with_options(drafter: D, options: BatchOptions) -> Self {
        Self { drafter, options }
    }

    pub fn drafter(&self) -> &D {
        &self.drafter
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }
}

impl<D: FormulaDrafter> FormulaStrategy for DraftingStrategy<D> {
    fn name(&self) -> &'static str {
        "drafting"
    }

    fn formula(&mut self, analysis: &Analysis) -> String {
        if analysis.references.is_empty() {
            return concatenate_echo(&analysis.text);
        }

        let formula = match self.drafter.draft(analysis) {
            Ok(draft) => ensure_formula_prefix(draft.trim()),
            Err(e) => {
                log::warn!("drafter failed: {}", e);
                error_marker(&e.to_string())
            }
        };

        if !self.options.delay.is_zero() {
            thread::sleep(self.options.delay);
        }

        formula
    }
}

/// `=CONCATENATE("Text: ", "<text>")`, used for instructions without references
pub fn concatenate_echo(text: &str) -> String {
    format!("=CONCATENATE(\"Text: \", {})", quote_literal(text))
}

/// `=ERROR("Failed to generate formula: <message>")`
pub fn error_marker(message: &str) -> String {
    format!(
        "=ERROR({})",
        quote_literal(&format!("Failed to generate formula: {}", message))
    )
}
