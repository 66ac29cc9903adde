//! Per-instruction analysis shared by every strategy

use crate::classify::{classify, Archetype};
use crate::ratio::{parse_ratios, CalculationTriple};
use crate::reference::{extract, ReferenceSet};

/// What the pipeline learned about one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub text: String,
    pub references: ReferenceSet,
    pub archetype: Archetype,
    /// Only filled for [`Archetype::RatioCalculation`]
    pub triples: Vec<CalculationTriple>,
}

/// Extract, classify and (for ratio instructions) parse calculation triples
///
/// ```
/// use refanchor_translate::{analyze, Archetype};
///
/// let analysis = analyze("Percentage: F12 = F11/F10");
/// assert_eq!(analysis.archetype, Archetype::RatioCalculation);
/// assert_eq!(analysis.triples.len(), 1);
/// ```
pub fn analyze(text: &str) -> Analysis {
    let references = extract(text);
    let archetype = classify(text, &references);
    let triples = if archetype == Archetype::RatioCalculation {
        parse_ratios(text)
    } else {
        Vec::new()
    };

    Analysis {
        text: text.to_string(),
        references,
        archetype,
        triples,
    }
}
