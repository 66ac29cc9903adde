//! `F12 = F11/F10` calculation patterns

use lazy_regex::regex;
use serde::Serialize;

use crate::reference::CellRef;

/// Most calculation triples read from one instruction
pub const MAX_RATIO_TRIPLES: usize = 5;

/// `result = numerator/denominator`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationTriple {
    pub result: CellRef,
    pub numerator: CellRef,
    pub denominator: CellRef,
}

/// Read calculation triples from left to right, keeping the first
/// [`MAX_RATIO_TRIPLES`].
///
/// A triple is kept only when all three of its addresses parse; `$` markers
/// are not expected here. A concatenated divisor such as `F27 = F26F25` has
/// no `/` and yields nothing.
pub fn parse_ratios(text: &str) -> Vec<CalculationTriple> {
    regex!(r"(?i)([A-Z]+\d+)\s*=\s*([A-Z]+\d+)/([A-Z]+\d+)")
        .captures_iter(text)
        .filter_map(|caps| {
            let result = CellRef::parse(&caps[1]).ok()?;
            let numerator = CellRef::parse(&caps[2]).ok()?;
            let denominator = CellRef::parse(&caps[3]).ok()?;
            Some(CalculationTriple {
                result,
                numerator,
                denominator,
            })
        })
        .take(MAX_RATIO_TRIPLES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(text: &str) -> Vec<String> {
        parse_ratios(text)
            .iter()
            .map(|t| format!("{}={}/{}", t.result, t.numerator, t.denominator))
            .collect()
    }

    #[test]
    fn test_single() {
        assert_eq!(rendered("F12 = F11/F10"), vec!["F12=F11/F10"]);
        assert_eq!(rendered("f12=f11/f10"), vec!["F12=F11/F10"]);
    }

    #[test]
    fn test_concatenated_divisor() {
        assert!(parse_ratios("F27 = F26F25").is_empty());
    }

    #[test]
    fn test_capped_in_order() {
        let text = "Data validation Automate the calculation by calculating the percentage: \
                    - For F12 = F11/F10 - For F21 = F20/F19 - For F27 = F26F25 \
                    - For F33 = F32/F31 - For F39 = F38/F37 - For F44 = F43/F42 \
                    - For G12 = G11/G10 - For H12 = H11/H10";
        assert_eq!(
            rendered(text),
            vec![
                "F12=F11/F10",
                "F21=F20/F19",
                "F33=F32/F31",
                "F39=F38/F37",
                "F44=F43/F42",
            ]
        );
    }

    #[test]
    fn test_row_zero_drops_triple() {
        assert_eq!(rendered("A0 = B1/C1, D2 = E2/F2"), vec!["D2=E2/F2"]);
    }
}
