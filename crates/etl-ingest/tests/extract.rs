//! Integration tests for source extraction.

use std::fs;

use etl_ingest::{IngestError, SourceFormat, extract, list_input_files};
use tempfile::TempDir;

#[test]
fn semicolon_windows_1252_csv_is_extracted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ventas.csv");
    // "Código;Descripción;Precio" with Latin-1 accents, decimal commas inside quotes
    let bytes = b"C\xF3digo;Descripci\xF3n;Precio\nA01-p001;Cami\xF3n;\"1,5\"\nA01-p002;;3\n";
    fs::write(&path, bytes).unwrap();

    let table = extract(&path).unwrap();

    assert_eq!(table.headers, vec!["Código", "Descripción", "Precio"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.rows[0][1].as_deref(), Some("Camión"));
    assert_eq!(table.rows[0][2].as_deref(), Some("1,5"));
    assert_eq!(table.rows[1][1], None);
    assert_eq!(
        table.format,
        SourceFormat::Csv {
            delimiter: b';',
            encoding: "windows-1252"
        }
    );
}

#[test]
fn utf8_csv_round_trips_into_frame() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.csv");
    fs::write(&path, "\u{feff}codigo,stock\nP001,5\nP002,\n").unwrap();

    let table = extract(&path).unwrap();
    assert_eq!(table.headers[0], "codigo");

    let names = vec!["codigo".to_string(), "stock".to_string()];
    let df = table.to_frame(&names).unwrap();
    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.column("stock").unwrap().null_count(), 1);
}

#[test]
fn header_only_csv_yields_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vacio.csv");
    fs::write(&path, "codigo,cantidad\n").unwrap();

    let table = extract(&path).unwrap();
    assert_eq!(table.width(), 2);
    assert_eq!(table.height(), 0);
}

#[test]
fn discovery_then_extract_skips_nothing_supported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "x\n1\n").unwrap();
    fs::write(dir.path().join("b.json"), "{}").unwrap();

    let files = list_input_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert!(extract(&files[0]).is_ok());
    assert!(matches!(
        extract(&dir.path().join("b.json")),
        Err(IngestError::UnsupportedFormat { .. })
    ));
}

const WORKBOOK_PARTS: [(&str, &str); 6] = [
    (
        "[Content_Types].xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
    ),
    (
        "_rels/.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    ),
    (
        "xl/workbook.xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="Ventas" sheetId="1" r:id="rId1"/>
<sheet name="Notas" sheetId="2" r:id="rId2"/>
</sheets>
</workbook>"#,
    ),
    (
        "xl/_rels/workbook.xml.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
    ),
    (
        "xl/styles.xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<cellXfs count="2">
<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
<xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
</cellXfs>
</styleSheet>"#,
    ),
    (
        "xl/worksheets/sheet2.xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>nota</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>ignorar</t></is></c></row>
</sheetData>
</worksheet>"#,
    ),
];

// Row 3 is blank; B2 holds the serial for 2024-03-05 with a date style.
const SALES_SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>codigo</t></is></c><c r="B1" t="inlineStr"><is><t>fecha</t></is></c><c r="C1" t="inlineStr"><is><t>cantidad</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>P001</t></is></c><c r="B2" s="1"><v>45356</v></c><c r="C2"><v>3</v></c></row>
<row r="3"><c r="A3" t="inlineStr"><is><t>  </t></is></c></row>
<row r="4"><c r="A4" t="inlineStr"><is><t>P002</t></is></c><c r="C4"><v>2.5</v></c></row>
</sheetData>
</worksheet>"#;

fn write_workbook(path: &std::path::Path) {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let parts = WORKBOOK_PARTS
        .iter()
        .copied()
        .chain(std::iter::once(("xl/worksheets/sheet1.xml", SALES_SHEET)));
    for (name, body) in parts {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn workbook_first_sheet_is_read_with_dates_and_no_blank_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ventas.xlsx");
    write_workbook(&path);

    let table = extract(&path).unwrap();

    assert_eq!(
        table.format,
        SourceFormat::Excel {
            sheet: "Ventas".to_string()
        }
    );
    assert_eq!(table.headers, vec!["codigo", "fecha", "cantidad"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.rows[0][0].as_deref(), Some("P001"));
    assert_eq!(table.rows[0][1].as_deref(), Some("2024-03-05"));
    assert_eq!(table.rows[0][2].as_deref(), Some("3"));
    assert_eq!(table.rows[1][0].as_deref(), Some("P002"));
    assert_eq!(table.rows[1][1], None);
    assert_eq!(table.rows[1][2].as_deref(), Some("2.5"));
    assert!(table.rows.iter().flatten().flatten().all(|cell| cell != "ignorar"));
}
