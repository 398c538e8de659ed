//! Loading real workbook files from disk

use crate::common::TestFixture;
use chrono::NaiveDate;
use sheetdiff::loader::LoadErrorKind;
use sheetdiff::{load_workbook, load_workbook_from_bytes, CellValue};

#[test]
fn test_load_preserves_sheet_order_and_headers() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_xlsx(
        "book.xlsx",
        &[
            ("Zeta", vec!["B", "A"], vec![vec!["x".into(), 1.into()]]),
            ("Alpha", vec!["ID"], vec![vec![1.into()], vec![2.into()]]),
        ],
    );

    let workbook = load_workbook(&path).unwrap();

    assert_eq!(workbook.sheet_names(), vec!["Zeta", "Alpha"]);
    let zeta = workbook.sheet("Zeta").unwrap();
    assert_eq!(zeta.headers, vec!["B", "A"]);
    assert_eq!(zeta.rows[0].get("B"), &CellValue::from("x"));
    assert_eq!(zeta.rows[0].get("A"), &CellValue::from(1));
    assert_eq!(workbook.sheet("Alpha").unwrap().row_count(), 2);
}

#[test]
fn test_load_typed_values() {
    let fixture = TestFixture::new().unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let path = fixture.create_single_sheet(
        "typed.xlsx",
        vec!["Text", "Number", "Flag", "Day", "Blank"],
        vec![vec!["hello".into(), 2.5.into(), true.into(), day.into(), CellValue::Empty]],
    );

    let workbook = load_workbook(&path).unwrap();
    let row = &workbook.sheets[0].rows[0];

    assert_eq!(row.get("Text"), &CellValue::from("hello"));
    assert_eq!(row.get("Number"), &CellValue::from(2.5));
    assert_eq!(row.get("Flag"), &CellValue::from(true));
    assert_eq!(row.get("Day"), &CellValue::from(day));
    assert!(row.get("Blank").is_empty());
}

#[test]
fn test_load_duration_as_text() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_formatted_number("elapsed.xlsx", "Elapsed", 1.5, "[h]:mm:ss");

    let workbook = load_workbook(&path).unwrap();

    assert_eq!(workbook.sheets[0].rows[0].get("Elapsed"), &CellValue::from("36:00:00"));
}

#[test]
fn test_load_from_bytes_matches_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_single_sheet(
        "bytes.xlsx",
        vec!["ID", "Name"],
        vec![vec![1.into(), "Alice".into()]],
    );

    let from_file = load_workbook(&path).unwrap();
    let from_bytes = load_workbook_from_bytes(std::fs::read(&path).unwrap()).unwrap();

    assert_eq!(from_file.sheet_names(), from_bytes.sheet_names());
    assert_eq!(from_file.sheets[0].rows, from_bytes.sheets[0].rows);
}

#[test]
fn test_load_missing_file() {
    let fixture = TestFixture::new().unwrap();
    let err = load_workbook(&fixture.root().join("nope.xlsx")).unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::NotFound);
}

#[test]
fn test_load_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.root().join("data.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let err = load_workbook(&path).unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::UnsupportedFormat);
}

#[test]
fn test_load_corrupt_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.create_corrupted_file("broken.xlsx").unwrap();

    let err = load_workbook(&path).unwrap_err();
    assert_ne!(err.kind, LoadErrorKind::NotFound);
}
