//! Comparison report types and their assembly

use crate::cells::CellChange;
use crate::columns::{ColumnAlignment, ColumnOrderChange};
use crate::rows::{RowAlignment, RowMatching};
use crate::sheets::{SheetAlignment, SheetPair};
use crate::workbook::Row;
use indexmap::IndexMap;
use serde::Serialize;

/// Root output of a comparison
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonReport {
    pub sheets_in_common: Vec<String>,
    pub sheets_only_in_reference: Vec<String>,
    pub sheets_only_in_comparison: Vec<String>,
    pub per_sheet_results: IndexMap<String, SheetDiff>,
}

/// Differences found in one matched sheet pair
#[derive(Debug, Clone, Serialize)]
pub struct SheetDiff {
    pub reference_sheet: String,
    pub comparison_sheet: String,
    pub columns_only_in_reference: Vec<String>,
    pub columns_only_in_comparison: Vec<String>,
    pub order_mismatch: bool,
    /// Present only when `order_mismatch` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_order: Option<ColumnOrderChange>,
    pub row_matching: RowMatching,
    pub modified_cells: Vec<CellChange>,
    pub new_rows: Vec<Row>,
    pub deleted_rows: Vec<Row>,
}

impl SheetDiff {
    pub fn has_column_changes(&self) -> bool {
        self.order_mismatch
            || !self.columns_only_in_reference.is_empty()
            || !self.columns_only_in_comparison.is_empty()
    }

    pub fn has_row_changes(&self) -> bool {
        !self.modified_cells.is_empty() || !self.new_rows.is_empty() || !self.deleted_rows.is_empty()
    }

    pub fn has_differences(&self) -> bool {
        self.has_column_changes() || self.has_row_changes()
    }
}

/// Totals across all sheets, for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub sheets_compared: usize,
    pub sheets_only_in_reference: usize,
    pub sheets_only_in_comparison: usize,
    pub sheets_with_column_changes: usize,
    pub modified_cells: usize,
    pub new_rows: usize,
    pub deleted_rows: usize,
}

impl ComparisonReport {
    pub fn has_differences(&self) -> bool {
        !self.sheets_only_in_reference.is_empty()
            || !self.sheets_only_in_comparison.is_empty()
            || self.per_sheet_results.values().any(SheetDiff::has_differences)
    }

    pub fn summary(&self) -> ReportSummary {
        let sheets = self.per_sheet_results.values();
        ReportSummary {
            sheets_compared: self.per_sheet_results.len(),
            sheets_only_in_reference: self.sheets_only_in_reference.len(),
            sheets_only_in_comparison: self.sheets_only_in_comparison.len(),
            sheets_with_column_changes: sheets.clone().filter(|d| d.has_column_changes()).count(),
            modified_cells: sheets.clone().map(|d| d.modified_cells.len()).sum(),
            new_rows: sheets.clone().map(|d| d.new_rows.len()).sum(),
            deleted_rows: sheets.map(|d| d.deleted_rows.len()).sum(),
        }
    }
}

pub struct ReportAssembler;

impl ReportAssembler {
    /// Gather the aligner and differ outputs for one sheet pair
    pub fn sheet_diff(
        pair: &SheetPair<'_>,
        columns: ColumnAlignment,
        rows: RowAlignment<'_>,
        modified_cells: Vec<CellChange>,
    ) -> SheetDiff {
        let order_mismatch = columns.order_mismatch();
        SheetDiff {
            reference_sheet: pair.reference.name.clone(),
            comparison_sheet: pair.comparison.name.clone(),
            columns_only_in_reference: columns.only_in_reference,
            columns_only_in_comparison: columns.only_in_comparison,
            order_mismatch,
            column_order: columns.order_change,
            row_matching: rows.matching,
            modified_cells,
            new_rows: rows.new_rows.into_iter().cloned().collect(),
            deleted_rows: rows.deleted_rows.into_iter().cloned().collect(),
        }
    }

    /// Merge per-sheet results, given in the alignment's common order
    pub fn assemble(alignment: SheetAlignment, results: Vec<SheetDiff>) -> ComparisonReport {
        let sheets_in_common = alignment.common_labels();
        debug_assert_eq!(sheets_in_common.len(), results.len());

        let per_sheet_results: IndexMap<String, SheetDiff> =
            sheets_in_common.iter().cloned().zip(results).collect();

        debug_assert!(per_sheet_results.keys().all(|k| {
            !alignment.only_in_reference.contains(k) && !alignment.only_in_comparison.contains(k)
        }));

        ComparisonReport {
            sheets_in_common,
            sheets_only_in_reference: alignment.only_in_reference,
            sheets_only_in_comparison: alignment.only_in_comparison,
            per_sheet_results,
        }
    }
}
