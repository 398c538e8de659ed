//! End-to-end runs of the `compare` and `inspect` commands

use crate::common::{assertions, sample_data, CliTestRunner};
use serde_json::json;
use sheetdiff::{SheetdiffError, WorkbookSide};

#[test]
fn test_compare_writes_json_report() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let reference = fixture.create_single_sheet(
        "reference.xlsx",
        sample_data::ledger_headers(),
        sample_data::ledger_reference_rows(),
    );
    let comparison = fixture.create_single_sheet(
        "comparison.xlsx",
        sample_data::ledger_headers(),
        sample_data::ledger_comparison_rows(),
    );

    let report = runner.compare_json(&reference, &comparison, &["--primary-key", "ID"]);
    let sheet = &report["per_sheet_results"]["Sheet1"];

    assert_eq!(report["sheets_in_common"], json!(["Sheet1"]));
    assert_eq!(sheet["row_matching"], json!({"mode": "primary_key", "column": "ID"}));
    assert_eq!(
        sheet["modified_cells"],
        json!([{
            "row": 1,
            "column": "Amount",
            "reference_column": "Amount",
            "comparison_column": "Amount",
            "old_value": 100,
            "new_value": 150
        }])
    );
    assert_eq!(sheet["new_rows"][0]["cells"], json!({"ID": 3, "Name": "Carl", "Amount": 300}));
    assert_eq!(sheet["deleted_rows"][0]["cells"], json!({"ID": 2, "Name": "Bob", "Amount": 200}));
    assert_eq!(sheet["columns_only_in_reference"], json!([]));
    assert_eq!(sheet["columns_only_in_comparison"], json!([]));
}

#[test]
fn test_compare_identical_files() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_single_sheet(
        "same.xlsx",
        sample_data::ledger_headers(),
        sample_data::ledger_reference_rows(),
    );

    let report = runner.compare_json(&path, &path, &[]);
    assertions::assert_report_clean(&report);
}

#[test]
fn test_compare_pretty_and_json_formats() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let reference = fixture.create_xlsx("a.xlsx", &sample_data::monthly_reference());
    let comparison = fixture.create_xlsx("b.xlsx", &sample_data::monthly_comparison());

    runner.expect_success(&["compare", reference.to_str().unwrap(), comparison.to_str().unwrap()]);
    runner.expect_success(&[
        "compare",
        reference.to_str().unwrap(),
        comparison.to_str().unwrap(),
        "--format",
        "json",
    ]);
}

#[test]
fn test_compare_config_file_with_flag_override() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let reference = fixture.create_single_sheet(
        "reference.xlsx",
        vec!["id", "Value"],
        vec![vec![1.into(), "a".into()], vec![2.into(), "b".into()]],
    );
    let comparison = fixture.create_single_sheet(
        "comparison.xlsx",
        vec!["ID", "value"],
        vec![vec![2.into(), "b".into()], vec![1.into(), "z".into()]],
    );
    let config = fixture
        .create_config("settings.json", &json!({"primary_key_column": "ID"}))
        .unwrap();

    let report = runner.compare_json(
        &reference,
        &comparison,
        &["--config", config.to_str().unwrap(), "--ignore-header-case"],
    );
    let sheet = &report["per_sheet_results"]["Sheet1"];

    assert_eq!(sheet["row_matching"]["mode"], "primary_key");
    assert_eq!(sheet["row_matching"]["column"], "id");
    assert_eq!(
        sheet["modified_cells"],
        json!([{
            "row": 1,
            "column": "value",
            "reference_column": "Value",
            "comparison_column": "value",
            "old_value": "a",
            "new_value": "z"
        }])
    );
}

#[test]
fn test_compare_invalid_config_file() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let path = fixture.create_single_sheet("a.xlsx", vec!["ID"], vec![]);
    let config = fixture
        .create_config("settings.json", &json!({"primary_key": "ID"}))
        .unwrap();

    let err = runner.expect_failure(&[
        "compare",
        path.to_str().unwrap(),
        path.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(matches!(err, SheetdiffError::Config { .. }));
}

#[test]
fn test_compare_corrupt_comparison_file() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let good = fixture.create_single_sheet("good.xlsx", vec!["ID"], vec![vec![1.into()]]);
    let broken = fixture.create_corrupted_file("broken.xlsx").unwrap();

    let err = runner.expect_failure(&["compare", good.to_str().unwrap(), broken.to_str().unwrap()]);
    assert!(matches!(
        err,
        SheetdiffError::LoadFailure { side: WorkbookSide::Comparison, .. }
    ));
    assert!(err.to_string().contains("comparison"));
}

#[test]
fn test_compare_invalid_format() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_single_sheet("a.xlsx", vec!["ID"], vec![]);

    let err = runner.expect_failure(&[
        "compare",
        path.to_str().unwrap(),
        path.to_str().unwrap(),
        "--format",
        "yaml",
    ]);
    assert!(matches!(err, SheetdiffError::InvalidInput { .. }));
}

#[test]
fn test_inspect_command() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner
        .fixture()
        .create_xlsx("book.xlsx", &sample_data::monthly_reference());

    runner.expect_success(&["inspect", path.to_str().unwrap()]);
    runner.expect_success(&["inspect", path.to_str().unwrap(), "--format", "json"]);

    let err = runner.expect_failure(&["inspect", runner.fixture().root().join("missing.xlsx").to_str().unwrap()]);
    assert!(matches!(err, SheetdiffError::LoadFailure { .. }));
}
