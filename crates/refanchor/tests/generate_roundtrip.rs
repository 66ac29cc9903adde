//! End-to-end tests: workbook on disk -> instructions -> formulas -> workbook on disk

use pretty_assertions::assert_eq;
use refanchor::prelude::*;
use refanchor::{default_copy_path, Analysis, FormulaDrafter, EXPORT_SHEET_NAME};
use std::io::Cursor;
use std::time::Duration;

const NUMERIC: &str = "The following cells should only allow numeric inputs: F10; G10; H10; F11; G11; H11; L11;";
const PERCENTAGE: &str = "Data validation Automate the calculation by calculating the percentage: - For F12 = F11/F10 - For F21 = F20/F19";

/// The sheet layout the tool is pointed at: an address column and a text column
fn sample_workbook() -> Workbook {
    let mut wb = Workbook::empty();
    wb.add_worksheet_with_name("Sheet").unwrap();
    let sheet = wb.worksheet_mut(0).unwrap();

    sheet.set_cell_value("A1", "Sheet").unwrap();
    sheet.set_cell_value("B1", "Cell Reference").unwrap();
    sheet.set_cell_value("C1", "Text").unwrap();
    sheet.set_cell_value("D1", "Formula with dynamic references").unwrap();

    sheet.set_cell_value("A2", "Assessment_of_Org_Structure").unwrap();
    sheet.set_cell_value("B2", "$Z$4").unwrap();
    sheet.set_cell_value("C2", NUMERIC).unwrap();

    sheet.set_cell_value("A3", "Assessment_of_Org_Structure").unwrap();
    sheet.set_cell_value("B3", "$Z$5").unwrap();
    sheet.set_cell_value("C3", PERCENTAGE).unwrap();
    wb
}

#[test]
fn test_generate_into_copy() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("checklist.xlsx");
    sample_workbook().save(&input).unwrap();

    let mut workbook = Workbook::open(&input).unwrap();
    let mut driver = BatchDriver::new(TemplateStrategy);
    let results = process_range(&workbook, "Sheet", "C", "2:3", &mut driver);
    assert_eq!(results.len(), 2);

    write_formulas(&mut workbook, "Sheet", "D", &results).unwrap();
    let copy = default_copy_path(&input);
    assert_eq!(copy, dir.path().join("checklist_with_formulas.xlsx"));
    workbook.save(&copy).unwrap();

    let reopened = Workbook::open(&copy).unwrap();
    let sheet = reopened.worksheet_by_name("Sheet").unwrap();
    assert_eq!(
        sheet.get_formula_at(1, 3),
        Some(
            "=\"The following cells should only allow numeric inputs: \" & \
             ADDRESS(ROW(F10),COLUMN(F10)) & \"; \" & ADDRESS(ROW(F11),COLUMN(F11)) & \"; \" & \
             ADDRESS(ROW(G10),COLUMN(G10)) & \"; \" & ADDRESS(ROW(G11),COLUMN(G11)) & \"; \" & \
             ADDRESS(ROW(H10),COLUMN(H10)) & \"; \" & ADDRESS(ROW(H11),COLUMN(H11)) & \"; \" & \
             ADDRESS(ROW(L11),COLUMN(L11))"
        )
    );
    assert_eq!(
        sheet.get_formula_at(2, 3),
        Some(
            "=\"For \" & ADDRESS(ROW(F12),COLUMN(F12)) & \" = \" & ADDRESS(ROW(F11),COLUMN(F11)) \
             & \"/\" & ADDRESS(ROW(F10),COLUMN(F10)) & \", \" & \
             \"For \" & ADDRESS(ROW(F21),COLUMN(F21)) & \" = \" & ADDRESS(ROW(F20),COLUMN(F20)) \
             & \"/\" & ADDRESS(ROW(F19),COLUMN(F19))"
        )
    );
    // Everything else is carried over
    assert_eq!(sheet.cell_text("B2").unwrap().as_deref(), Some("$Z$4"));
    assert_eq!(sheet.cell_text("C3").unwrap().as_deref(), Some(PERCENTAGE));

    // The input is untouched
    let original = Workbook::open(&input).unwrap();
    assert_eq!(original.worksheet(0).unwrap().get_formula_at(1, 3), None);
}

#[test]
fn test_address_column_is_read_like_any_instruction() {
    let wb = sample_workbook();
    let mut driver = BatchDriver::new(TemplateStrategy);
    let results = process_range(&wb, "Sheet", "B", "1:3", &mut driver);

    let refs: Vec<String> = results.iter().map(|r| r.references.render()).collect();
    assert_eq!(refs, vec!["", "Z4", "Z5"]);
    assert_eq!(results[0].archetype, Archetype::NoReferences);
    assert_eq!(results[0].formula, "=\"Cell Reference\"");
}

#[test]
fn test_export_formats() {
    let dir = tempfile::tempdir().unwrap();
    let wb = sample_workbook();
    let mut driver = BatchDriver::new(TemplateStrategy);
    let results = process_range(&wb, "Sheet", "C", "1:3", &mut driver);
    assert_eq!(results.len(), 3);

    let xlsx = dir.path().join("out.xlsx");
    save_results(&results, &xlsx).unwrap();
    let exported = Workbook::open(&xlsx).unwrap();
    assert_eq!(exported.sheet_names(), vec![EXPORT_SHEET_NAME]);
    let table = exported.worksheet(0).unwrap();
    assert_eq!(table.cell_text("A1").unwrap().as_deref(), Some("sheet_name"));
    assert_eq!(table.cell_text("B3").unwrap().as_deref(), Some("C2"));
    assert_eq!(
        table.cell_text("D2").unwrap().as_deref(),
        Some("No cell references found")
    );
    assert_eq!(
        table.cell_text("E4").unwrap().as_deref(),
        Some(results[2].formula.as_str())
    );

    let csv = dir.path().join("out.csv");
    save_results(&results, &csv).unwrap();
    let text = std::fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("sheet_name,instruction_cell,original_instruction,extracted_cell_refs,dynamic_formula")
    );
    assert_eq!(lines.next(), Some("Sheet,C1,Text,No cell references found,\"=\"\"Text\"\"\""));

    let json = dir.path().join("out.json");
    save_results(&results, &json).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value[1]["address"], "C2");
    assert_eq!(value[1]["archetype"], "numeric_validation");
    assert_eq!(value[2]["references"][0], "F10");
}

#[test]
fn test_csv_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("instructions.csv");
    std::fs::write(
        &input,
        "Text,Formula\n\"Only allow numeric inputs: F10; G10\",\nnothing to see,\n",
    )
    .unwrap();

    let mut workbook = Workbook::open(&input).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["instructions"]);

    let mut driver = BatchDriver::new(TemplateStrategy);
    let results = process_range(&workbook, "instructions", "A", "2:3", &mut driver);
    write_formulas(&mut workbook, "instructions", "B", &results).unwrap();
    workbook.save(&input).unwrap();

    let reopened = Workbook::open(&input).unwrap();
    let sheet = reopened.worksheet(0).unwrap();
    assert_eq!(sheet.get_formula_at(2, 1), Some("=\"nothing to see\""));
    assert!(sheet
        .get_formula_at(1, 1)
        .unwrap()
        .ends_with("ADDRESS(ROW(G10),COLUMN(G10))"));
}

/// Drafter that answers with the first reference it was given
struct FirstReference;

impl FormulaDrafter for FirstReference {
    type Error = String;

    fn draft(&mut self, analysis: &Analysis) -> std::result::Result<String, String> {
        match analysis.references.first() {
            Some(r) if r.column() == "L" => Err(format!("refusing {}", r)),
            Some(r) => Ok(format!("ISNUMBER({})", r)),
            None => Err("no references".into()),
        }
    }
}

#[test]
fn test_drafting_strategy_in_a_batch() {
    let mut wb = sample_workbook();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value("C4", "Check L20 please")
        .unwrap();

    let strategy = DraftingStrategy::with_options(
        FirstReference,
        BatchOptions {
            delay: Duration::ZERO,
        },
    );
    let mut driver = BatchDriver::new(strategy);
    let formulas: Vec<String> = process_range(&wb, "Sheet", "C", "1:4", &mut driver)
        .into_iter()
        .map(|r| r.formula)
        .collect();

    assert_eq!(
        formulas,
        vec![
            "=CONCATENATE(\"Text: \", \"Text\")".to_string(),
            "=ISNUMBER(F10)".to_string(),
            "=ISNUMBER(F10)".to_string(),
            "=ERROR(\"Failed to generate formula: refusing L20\")".to_string(),
        ]
    );
}

#[test]
fn test_workbook_from_memory() {
    let mut buf = Vec::new();
    XlsxWriter::write(&sample_workbook(), Cursor::new(&mut buf)).unwrap();
    let wb = XlsxReader::read(Cursor::new(&buf)).unwrap();

    let mut driver = BatchDriver::new(TemplateStrategy);
    assert!(process_range(&wb, "Sheet", "C", "3:2", &mut driver).is_empty());
    assert!(process_range(&wb, "Missing", "C", "1:3", &mut driver).is_empty());
    assert_eq!(process_range(&wb, "Sheet", "C", "3", &mut driver).len(), 1);
}
