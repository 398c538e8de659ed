//! Output formatting utilities

use crate::error::Result;
use crate::report::{ComparisonReport, SheetDiff};
use crate::rows::RowMatching;
use crate::workbook::{Row, Workbook};
use serde::Serialize;

/// Number of modified cells / rows listed per sheet before eliding the rest
const SAMPLE_LIMIT: usize = 5;

/// Pretty printer for sheetdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a full comparison report
    pub fn print_report(report: &ComparisonReport, reference_label: &str, comparison_label: &str) {
        println!("🔍 Comparison: {} → {}", reference_label, comparison_label);
        print!("{}", Self::render_sheet_summary(report));

        if report.per_sheet_results.is_empty() {
            println!("└─ No sheets in common");
            return;
        }

        let count = report.per_sheet_results.len();
        for (i, (label, diff)) in report.per_sheet_results.iter().enumerate() {
            let is_last = i == count - 1;
            let (marker, prefix) = if is_last { ("└─", "   ") } else { ("├─", "│  ") };
            if diff.has_differences() {
                println!("{} ❌ Sheet '{}'", marker, label);
                print!("{}", Self::render_sheet_diff(diff, prefix));
            } else {
                println!("{} ✅ Sheet '{}': identical", marker, label);
            }
        }
    }

    /// Sheet presence lines
    pub fn render_sheet_summary(report: &ComparisonReport) -> String {
        let mut out = String::new();
        if report.sheets_only_in_reference.is_empty() && report.sheets_only_in_comparison.is_empty() {
            out.push_str("├─ ✅ Sheets: all matched\n");
        } else {
            if !report.sheets_only_in_reference.is_empty() {
                out.push_str(&format!(
                    "├─ ❌ Sheets only in reference: {}\n",
                    report.sheets_only_in_reference.join(", ")
                ));
            }
            if !report.sheets_only_in_comparison.is_empty() {
                out.push_str(&format!(
                    "├─ ❌ Sheets only in comparison: {}\n",
                    report.sheets_only_in_comparison.join(", ")
                ));
            }
        }
        out.push_str(&format!(
            "├─ Sheets in common: [{}]\n",
            report.sheets_in_common.join(", ")
        ));
        out
    }

    /// Details of one sheet, each line starting with `prefix`
    pub fn render_sheet_diff(diff: &SheetDiff, prefix: &str) -> String {
        let mut lines = Vec::new();

        if !diff.columns_only_in_reference.is_empty() {
            lines.push(format!(
                "Columns only in reference: {}",
                diff.columns_only_in_reference.join(", ")
            ));
        }
        if !diff.columns_only_in_comparison.is_empty() {
            lines.push(format!(
                "Columns only in comparison: {}",
                diff.columns_only_in_comparison.join(", ")
            ));
        }
        if let Some(order) = &diff.column_order {
            lines.push(format!(
                "Column order changed: [{}] → [{}]",
                order.reference.join(", "),
                order.comparison.join(", ")
            ));
        }

        match &diff.row_matching {
            RowMatching::PrimaryKey { column } => lines.push(format!("Rows matched on key '{}'", column)),
            RowMatching::Positional { fallback_reason: Some(reason) } => {
                lines.push(format!("Rows matched by position ({})", reason))
            }
            RowMatching::Positional { fallback_reason: None } => {}
        }

        if !diff.modified_cells.is_empty() {
            lines.push(format!("Modified cells: {}", diff.modified_cells.len()));
            for change in diff.modified_cells.iter().take(SAMPLE_LIMIT) {
                lines.push(format!(
                    "   {} / {}: '{}' → '{}'",
                    change.row, change.column, change.old_value, change.new_value
                ));
            }
            if diff.modified_cells.len() > SAMPLE_LIMIT {
                lines.push(format!("   ... and {} more", diff.modified_cells.len() - SAMPLE_LIMIT));
            }
        }

        Self::push_rows(&mut lines, "New rows", &diff.new_rows);
        Self::push_rows(&mut lines, "Deleted rows", &diff.deleted_rows);

        let count = lines.len();
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let marker = if i == count - 1 { "└─" } else { "├─" };
                format!("{}{} {}\n", prefix, marker, line)
            })
            .collect()
    }

    fn push_rows(lines: &mut Vec<String>, title: &str, rows: &[Row]) {
        if rows.is_empty() {
            return;
        }
        lines.push(format!("{}: {}", title, rows.len()));
        for row in rows.iter().take(SAMPLE_LIMIT) {
            lines.push(format!("   row {}: {}", row.display_number(), format_row(row)));
        }
        if rows.len() > SAMPLE_LIMIT {
            lines.push(format!("   ... and {} more", rows.len() - SAMPLE_LIMIT));
        }
    }

    /// Machine-readable `key=value` summary
    pub fn print_quiet(report: &ComparisonReport) {
        print!("{}", Self::render_quiet(report));
    }

    pub fn render_quiet(report: &ComparisonReport) -> String {
        let summary = report.summary();
        format!(
            "differences={}\nsheets_compared={}\nsheets_only_in_reference={}\nsheets_only_in_comparison={}\nsheets_with_column_changes={}\nmodified_cells={}\nnew_rows={}\ndeleted_rows={}\n",
            report.has_differences(),
            summary.sheets_compared,
            summary.sheets_only_in_reference,
            summary.sheets_only_in_comparison,
            summary.sheets_with_column_changes,
            summary.modified_cells,
            summary.new_rows,
            summary.deleted_rows
        )
    }

    /// Print sheets, headers and row counts of a workbook
    pub fn print_workbook_overview(workbook: &Workbook, label: &str) {
        println!("📒 Workbook: {}", label);
        if workbook.is_empty() {
            println!("└─ No sheets");
            return;
        }
        let count = workbook.sheet_count();
        for (i, sheet) in workbook.sheets.iter().enumerate() {
            let (marker, prefix) = if i == count - 1 { ("└─", "   ") } else { ("├─", "│  ") };
            println!("{} {} ({} rows, {} columns)", marker, sheet.name, sheet.row_count(), sheet.column_count());
            println!("{}└─ Headers: [{}]", prefix, sheet.headers.join(", "));
        }
    }
}

fn format_row(row: &Row) -> String {
    row.cells
        .iter()
        .map(|(header, value)| format!("{}={}", header, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Sheet names, headers and row counts of a workbook
    pub fn format_workbook_overview(workbook: &Workbook) -> Result<String> {
        let sheets: Vec<serde_json::Value> = workbook
            .sheets
            .iter()
            .map(|sheet| {
                serde_json::json!({
                    "name": sheet.name,
                    "headers": sheet.headers,
                    "row_count": sheet.row_count(),
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&serde_json::json!({ "sheets": sheets }))?)
    }
}
