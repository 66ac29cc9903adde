//! Prompt text

use refanchor_translate::ReferenceSet;

/// System message sent with every request
pub const SYSTEM_PROMPT: &str = "You are an Excel formula expert. You convert text instructions into \
dynamic Excel formulas that automatically adjust when spreadsheet structure changes. \
Always return only the Excel formula starting with =.";

/// User message asking for a dynamic formula for one instruction
pub fn formula_prompt(instruction: &str, references: &ReferenceSet) -> String {
    format!(
        r#"Convert the following text instruction into a dynamic Excel formula that will automatically adjust when rows or columns are inserted or deleted.

Original instruction: "{instruction}"

Cell references found: {references}

Requirements:
1. Create a formula that expresses the same logic as the text instruction
2. Use Excel functions like CONCATENATE, INDIRECT, OFFSET, or similar to make references dynamic
3. The formula should work even if rows/columns are inserted or deleted
4. Return ONLY the Excel formula, starting with =
5. If the instruction involves validation or conditional logic, use appropriate Excel functions
6. If it's about cell formatting or data validation, create a formula that describes the validation rule

Example approaches:
- For text concatenation: =CONCATENATE("Text about cells: ", INDIRECT("F10"), ", ", INDIRECT("G10"))
- For validation rules: =IF(ISNUMBER(INDIRECT("F10")), "Valid", "Invalid")
- For range descriptions: ="Cells " & ADDRESS(ROW(F10),COLUMN(F10)) & " through " & ADDRESS(ROW(H20),COLUMN(H20)) & " should contain numeric values"

Please provide a formula that captures the essence of the instruction while being dynamic.
"#,
        instruction = instruction,
        references = references.render(),
    )
}
