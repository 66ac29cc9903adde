//! Instruction intent classification

use std::fmt;

use serde::{Serialize, Serializer};

use crate::reference::ReferenceSet;

/// Flavor of a generic annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Mentions data validation or automation
    Validation,
    /// Anything else
    Generic,
}

/// The shape of formula an instruction turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// No cell references; the text is echoed as a literal
    NoReferences,
    /// A list of cells that must hold numbers
    NumericValidation,
    /// Percentage calculations written as `F12 = F11/F10`
    RatioCalculation,
    /// A description that lists the referenced cells
    GenericAnnotation(Flavor),
}

impl Archetype {
    /// Stable snake_case label used in exports and logs
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::NoReferences => "no_references",
            Archetype::NumericValidation => "numeric_validation",
            Archetype::RatioCalculation => "ratio_calculation",
            Archetype::GenericAnnotation(Flavor::Validation) => "validation_annotation",
            Archetype::GenericAnnotation(Flavor::Generic) => "generic_annotation",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Archetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One row of the decision table. `text` is already lower-cased.
struct Rule {
    matches: fn(text: &str, refs: &ReferenceSet) -> bool,
    archetype: Archetype,
}

/// Checked in order; the first rule that matches decides
const RULES: &[Rule] = &[
    Rule {
        matches: |_, refs| refs.is_empty(),
        archetype: Archetype::NoReferences,
    },
    Rule {
        matches: |text, _| text.contains("numeric inputs") || text.contains("only allow"),
        archetype: Archetype::NumericValidation,
    },
    Rule {
        matches: |text, _| text.contains("percentage") && text.contains('='),
        archetype: Archetype::RatioCalculation,
    },
    Rule {
        matches: |text, _| text.contains("data validation") || text.contains("automate"),
        archetype: Archetype::GenericAnnotation(Flavor::Validation),
    },
];

/// Decide the archetype of an instruction from its text and references
pub fn classify(text: &str, refs: &ReferenceSet) -> Archetype {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&lowered, refs))
        .map(|rule| rule.archetype)
        .unwrap_or(Archetype::GenericAnnotation(Flavor::Generic))
}
