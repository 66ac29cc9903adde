//! Formula templates
//!
//! Every reference is written as `ADDRESS(ROW(F10),COLUMN(F10))`. Excel keeps
//! the inner `F10` pointing at the same logical cell when rows or columns are
//! inserted or deleted, so the text the formula shows follows the cell.

use crate::classify::{Archetype, Flavor};
use crate::error::{Result, TranslateError};
use crate::ratio::CalculationTriple;
use crate::reference::{CellRef, ReferenceSet};

/// Above this many references a numeric-validation instruction is summarized
pub const MAX_VALIDATION_REFS: usize = 10;

/// References listed by the fallback and annotation templates
pub const MAX_LISTED_REFS: usize = 8;

/// Longest description kept by the generic template
pub const MAX_PREFIX_CHARS: usize = 50;

/// Wrap text in a formula string literal, doubling embedded quotes
///
/// ```
/// use refanchor_translate::quote_literal;
///
/// assert_eq!(quote_literal(r#"say "hi""#), r#""say ""hi""""#);
/// ```
pub fn quote_literal(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Expression that evaluates to the current address of `reference`
pub fn indirection(reference: &CellRef) -> String {
    format!("ADDRESS(ROW({0}),COLUMN({0}))", reference)
}

/// Prepend `=` unless the formula already starts with one
pub fn ensure_formula_prefix(formula: &str) -> String {
    if formula.starts_with('=') {
        formula.to_string()
    } else {
        format!("={}", formula)
    }
}

/// `="<text>"`: the instruction itself as a literal
pub fn literal_echo(text: &str) -> String {
    format!("={}", quote_literal(text))
}

/// Build the formula for one classified instruction.
///
/// Never fails: if a template cannot be applied the instruction is echoed as
/// a literal with the reason appended.
pub fn synthesize(
    text: &str,
    archetype: Archetype,
    refs: &ReferenceSet,
    triples: &[CalculationTriple],
) -> String {
    match try_synthesize(text, archetype, refs, triples) {
        Ok(formula) => ensure_formula_prefix(&formula),
        Err(e) => {
            log::warn!("falling back to literal text: {}", e);
            literal_echo(&format!("{} ({})", text, e))
        }
    }
}

fn try_synthesize(
    text: &str,
    archetype: Archetype,
    refs: &ReferenceSet,
    triples: &[CalculationTriple],
) -> Result<String> {
    if archetype != Archetype::NoReferences && refs.is_empty() {
        return Err(TranslateError::MissingReferences {
            archetype: archetype.label(),
        });
    }

    Ok(match archetype {
        Archetype::NoReferences => literal_echo(text),
        Archetype::NumericValidation => numeric_validation(refs),
        Archetype::RatioCalculation if !triples.is_empty() => ratio_calculation(triples),
        Archetype::RatioCalculation => {
            listing("Percentage calculations involve cells", refs)
        }
        Archetype::GenericAnnotation(Flavor::Validation) => {
            listing("Data validation for cells", refs)
        }
        Archetype::GenericAnnotation(Flavor::Generic) => listing(description(text), refs),
    })
}

fn numeric_validation(refs: &ReferenceSet) -> String {
    if refs.len() <= MAX_VALIDATION_REFS {
        let cells: Vec<String> = refs.iter().map(indirection).collect();
        return format!(
            "={} & {}",
            quote_literal("The following cells should only allow numeric inputs: "),
            cells.join(" & \"; \" & ")
        );
    }

    // Checked non-empty by the caller
    let first = refs.iter().map(indirection).next().unwrap_or_default();
    format!(
        "={} & {}",
        quote_literal(&format!(
            "Validation applies to {} cells starting from ",
            refs.len()
        )),
        first
    )
}

fn ratio_calculation(triples: &[CalculationTriple]) -> String {
    let entries: Vec<String> = triples
        .iter()
        .map(|t| {
            format!(
                "\"For \" & {} & \" = \" & {} & \"/\" & {}",
                indirection(&t.result),
                indirection(&t.numerator),
                indirection(&t.denominator)
            )
        })
        .collect();
    format!("={}", entries.join(" & \", \" & "))
}

/// `="<label>: " & E1 & ", " & E2 ...` over the first few references
fn listing(label: &str, refs: &ReferenceSet) -> String {
    let cells: Vec<String> = refs.iter().take(MAX_LISTED_REFS).map(indirection).collect();
    format!(
        "={} & {}",
        quote_literal(&format!("{}: ", label)),
        cells.join(" & \", \" & ")
    )
}

/// Text up to the first colon, cut to at most [`MAX_PREFIX_CHARS`] characters
fn description(text: &str) -> &str {
    let head = text.split_once(':').map_or(text, |(before, _)| before);
    match head.char_indices().nth(MAX_PREFIX_CHARS) {
        Some((idx, _)) => &head[..idx],
        None => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::ratio::parse_ratios;
    use crate::reference::extract;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn template(text: &str) -> String {
        let refs = extract(text);
        let archetype = classify(text, &refs);
        synthesize(text, archetype, &refs, &parse_ratios(text))
    }

    #[test]
    fn test_no_references() {
        assert_eq!(template(r#"Say "hello" here"#), r#"="Say ""hello"" here""#);
    }

    #[test]
    fn test_numeric_validation_lists_each_cell() {
        assert_eq!(
            template("The following cells should only allow numeric inputs: F10; G10; H10"),
            "=\"The following cells should only allow numeric inputs: \" & \
             ADDRESS(ROW(F10),COLUMN(F10)) & \"; \" & \
             ADDRESS(ROW(G10),COLUMN(G10)) & \"; \" & \
             ADDRESS(ROW(H10),COLUMN(H10))"
        );
    }

    #[test]
    fn test_numeric_validation_summary() {
        let text = "Only allow numbers: F10; G10; H10; F11; G11; H11; L11; F19; G19; H19; F20";
        assert_eq!(
            template(text),
            "=\"Validation applies to 11 cells starting from \" & ADDRESS(ROW(F10),COLUMN(F10))"
        );
    }

    #[test]
    fn test_ratio() {
        assert_eq!(
            template("Percentage: F12 = F11/F10 and G12 = G11/G10"),
            "=\"For \" & ADDRESS(ROW(F12),COLUMN(F12)) & \" = \" & ADDRESS(ROW(F11),COLUMN(F11)) \
             & \"/\" & ADDRESS(ROW(F10),COLUMN(F10)) & \", \" & \
             \"For \" & ADDRESS(ROW(G12),COLUMN(G12)) & \" = \" & ADDRESS(ROW(G11),COLUMN(G11)) \
             & \"/\" & ADDRESS(ROW(G10),COLUMN(G10))"
        );
    }

    #[test]
    fn test_ratio_fallback_lists_first_eight() {
        let text = "percentage = F27 F26F25 A1 A2 A3 A4 A5 A6 A7 A8";
        let formula = template(text);
        assert!(formula.starts_with("=\"Percentage calculations involve cells: \" & ADDRESS(ROW(A1),COLUMN(A1))"));
        assert_eq!(formula.matches("ADDRESS(").count(), 8);
        assert!(!formula.contains("F27"));
    }

    #[test]
    fn test_validation_annotation() {
        assert_eq!(
            template("Automate checks on B2 and A1"),
            "=\"Data validation for cells: \" & ADDRESS(ROW(A1),COLUMN(A1)) & \", \" & ADDRESS(ROW(B2),COLUMN(B2))"
        );
    }

    #[test]
    fn test_generic_without_colon() {
        assert_eq!(
            template("Simple test with F1, G2, and H3 cells"),
            "=\"Simple test with F1, G2, and H3 cells: \" & ADDRESS(ROW(F1),COLUMN(F1)) & \", \" & \
             ADDRESS(ROW(G2),COLUMN(G2)) & \", \" & ADDRESS(ROW(H3),COLUMN(H3))"
        );
    }

    #[test]
    fn test_generic_prefix() {
        assert_eq!(description("Totals \"net\": see F10"), "Totals \"net\"");
        assert_eq!(
            template("Totals \"net\": see F10"),
            "=\"Totals \"\"net\"\": \" & ADDRESS(ROW(F10),COLUMN(F10))"
        );

        let long = "é".repeat(60) + " F1";
        assert_eq!(description(&long).chars().count(), MAX_PREFIX_CHARS);
    }

    #[test]
    fn test_generic_prefix_capped_before_late_colon() {
        let text = "This is a fairly long annotation sentence that keeps going well past \
                    fifty characters before the colon: F10";
        assert_eq!(
            description(text),
            "This is a fairly long annotation sentence that kee"
        );
        assert_eq!(
            template(text),
            "=\"This is a fairly long annotation sentence that kee: \" & ADDRESS(ROW(F10),COLUMN(F10))"
        );
    }

    #[test]
    fn test_numeric_validation_lists_exactly_ten() {
        let text = "Only allow numbers: A1 A2 A3 A4 A5 A6 A7 A8 A9 B1";
        let formula = template(text);
        assert!(formula.starts_with("=\"The following cells should only allow numeric inputs: \""));
        assert_eq!(formula.matches("ADDRESS(").count(), 10);
        assert_eq!(formula.matches(" & \"; \" & ").count(), 9);
    }

    #[test]
    fn test_ratio_output_stops_at_five_entries() {
        let text = "Percentage: F12 = F11/F10, G12 = G11/G10, H12 = H11/H10, \
                    I12 = I11/I10, J12 = J11/J10, K12 = K11/K10";
        let formula = template(text);
        assert_eq!(formula.matches("\"For \"").count(), 5);
        assert!(formula.contains("ADDRESS(ROW(J12),COLUMN(J12))"));
        assert!(!formula.contains("K12"));
    }

    #[test]
    fn test_missing_references_falls_back() {
        let formula = synthesize("see F10", Archetype::NumericValidation, &ReferenceSet::new(), &[]);
        assert_eq!(
            formula,
            "=\"see F10 (numeric_validation instruction has no cell references)\""
        );
    }

    #[test]
    fn test_ensure_formula_prefix() {
        assert_eq!(ensure_formula_prefix("SUM(A1)"), "=SUM(A1)");
        assert_eq!(ensure_formula_prefix("=SUM(A1)"), "=SUM(A1)");
    }

    proptest! {
        #[test]
        fn prop_literal_echo_roundtrips(text in "[^0-9]{0,60}") {
            // Without digits there are no references
            let refs = extract(&text);
            prop_assert!(refs.is_empty());
            let formula = synthesize(&text, classify(&text, &refs), &refs, &[]);
            prop_assert!(formula.starts_with("=\""));
            prop_assert!(formula.ends_with('"'));
            let inner = &formula[2..formula.len() - 1];
            prop_assert_eq!(inner.replace("\"\"", "\""), text);
        }
    }
}
