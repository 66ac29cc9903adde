//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use crate::escape::escape_xml;
use refanchor_core::{CellAddress, CellValue, Workbook, Worksheet};

/// Minimal stylesheet: one font, the two mandatory fills, one border, one xf
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::write(workbook, file)?;
        log::debug!(
            "wrote {} sheet(s) to {}",
            workbook.sheet_count(),
            path.display()
        );
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;

        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(STYLES_XML.as_bytes())?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::write_worksheet(&mut zip, i, sheet)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );
        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }
        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        )?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );
        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }
        content.push_str("\n    </sheets>\n</workbook>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            workbook.sheet_count() + 1
        ));

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        index: usize,
        sheet: &Worksheet,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        let mut current_row: Option<u32> = None;
        for (row, col, value) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            content.push_str("\n            ");
            content.push_str(&Self::cell_xml(&cell_ref, value));
        }
        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Render one `<c>` element
    fn cell_xml(cell_ref: &str, value: &CellValue) -> String {
        match value {
            CellValue::Empty => format!("<c r=\"{}\"/>", cell_ref),
            CellValue::Number(n) => format!("<c r=\"{}\"><v>{}</v></c>", cell_ref, n),
            CellValue::String(s) => format!(
                "<c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                cell_ref,
                escape_xml(s)
            ),
            CellValue::Boolean(b) => format!(
                "<c r=\"{}\" t=\"b\"><v>{}</v></c>",
                cell_ref,
                if *b { 1 } else { 0 }
            ),
            CellValue::Error(e) => format!(
                "<c r=\"{}\" t=\"e\"><v>{}</v></c>",
                cell_ref,
                escape_xml(e.as_str())
            ),
            CellValue::Formula { text, cached_value } => {
                let formula = escape_xml(text.strip_prefix('=').unwrap_or(text));
                match cached_value.as_deref() {
                    Some(CellValue::Number(n)) => {
                        format!("<c r=\"{}\"><f>{}</f><v>{}</v></c>", cell_ref, formula, n)
                    }
                    Some(CellValue::String(s)) => format!(
                        "<c r=\"{}\" t=\"str\"><f>{}</f><v>{}</v></c>",
                        cell_ref,
                        formula,
                        escape_xml(s)
                    ),
                    Some(CellValue::Boolean(b)) => format!(
                        "<c r=\"{}\" t=\"b\"><f>{}</f><v>{}</v></c>",
                        cell_ref,
                        formula,
                        if *b { 1 } else { 0 }
                    ),
                    Some(CellValue::Error(e)) => format!(
                        "<c r=\"{}\" t=\"e\"><f>{}</f><v>{}</v></c>",
                        cell_ref,
                        formula,
                        e.as_str()
                    ),
                    _ => format!("<c r=\"{}\"><f>{}</f></c>", cell_ref, formula),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XlsxReader;
    use pretty_assertions::assert_eq;
    use refanchor_core::CellError;
    use std::io::Cursor;

    fn roundtrip(workbook: &Workbook) -> Workbook {
        let mut buf = Cursor::new(Vec::new());
        XlsxWriter::write(workbook, &mut buf).unwrap();
        buf.set_position(0);
        XlsxReader::read(buf).unwrap()
    }

    #[test]
    fn test_roundtrip_values_and_formulas() {
        let mut wb = Workbook::new();
        {
            let ws = wb.worksheet_mut(0).unwrap();
            ws.set_cell_value("C4", "Only allow numeric inputs: F10, G10")
                .unwrap();
            ws.set_cell_value("C5", "  leading & trailing <space>  ").unwrap();
            ws.set_cell_value("A1", 3.5).unwrap();
            ws.set_cell_value("A2", false).unwrap();
            ws.set_cell_value("A3", CellError::Div0).unwrap();
            ws.set_cell_formula(
                "D4",
                r#"="Validate: " & ADDRESS(ROW(F10),COLUMN(F10))"#,
            )
            .unwrap();
        }
        wb.add_worksheet_with_name("R&D 'Q1'").unwrap();

        let back = roundtrip(&wb);
        assert_eq!(back.sheet_names(), vec!["Sheet1", "R&D 'Q1'"]);

        let ws = back.worksheet(0).unwrap();
        assert_eq!(
            ws.cell_text("C4").unwrap().as_deref(),
            Some("Only allow numeric inputs: F10, G10")
        );
        assert_eq!(
            ws.cell_text("C5").unwrap().as_deref(),
            Some("  leading & trailing <space>  ")
        );
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::Number(3.5));
        assert_eq!(ws.get_value("A2").unwrap(), CellValue::Boolean(false));
        assert_eq!(ws.get_value("A3").unwrap(), CellValue::Error(CellError::Div0));
        assert_eq!(
            ws.get_formula_at(3, 3),
            Some(r#"="Validate: " & ADDRESS(ROW(F10),COLUMN(F10))"#)
        );
    }

    #[test]
    fn test_cached_formula_value_survives() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value(
                "B2",
                CellValue::Formula {
                    text: "=F11/F10".into(),
                    cached_value: Some(Box::new(CellValue::Number(0.25))),
                },
            )
            .unwrap();

        let back = roundtrip(&wb);
        let ws = back.worksheet(0).unwrap();
        assert_eq!(ws.cell_text("B2").unwrap().as_deref(), Some("0.25"));
        assert_eq!(ws.get_formula_at(1, 1), Some("=F11/F10"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value("A1", "hello")
            .unwrap();
        XlsxWriter::write_file(&wb, &path).unwrap();

        let back = XlsxReader::read_file(&path).unwrap();
        assert_eq!(
            back.worksheet(0).unwrap().cell_text("A1").unwrap().as_deref(),
            Some("hello")
        );
    }
}
