//! Comparison entry point

use crate::cells::CellDiffer;
use crate::columns::ColumnAligner;
use crate::config::ComparisonConfig;
use crate::error::Result;
use crate::report::{ComparisonReport, ReportAssembler, SheetDiff};
use crate::rows::RowAligner;
use crate::sheets::{SheetAligner, SheetPair};
use crate::workbook::Workbook;
use rayon::prelude::*;

/// Compare a reference workbook against a comparison workbook.
///
/// Pure function of its inputs: the same workbooks and settings always give
/// the same report. Fatal conditions (an empty workbook in positional mode)
/// are returned before any sheet is diffed; a configured primary key missing
/// from a sheet only downgrades that sheet to positional row matching.
pub fn compare(
    reference: &Workbook,
    comparison: &Workbook,
    config: &ComparisonConfig,
) -> Result<ComparisonReport> {
    let alignment = SheetAligner::align(reference, comparison, config)?;
    let pairs = alignment.pairs(reference, comparison);

    // Sheets are independent; collect keeps alignment order
    let results: Vec<SheetDiff> = pairs
        .par_iter()
        .map(|pair| diff_sheet(pair, config))
        .collect();

    let report = ReportAssembler::assemble(alignment, results);

    let summary = report.summary();
    log::info!(
        "Compared {} sheets: {} modified cells, {} new rows, {} deleted rows",
        summary.sheets_compared,
        summary.modified_cells,
        summary.new_rows,
        summary.deleted_rows
    );

    Ok(report)
}

/// Diff one matched sheet pair
pub fn diff_sheet(pair: &SheetPair<'_>, config: &ComparisonConfig) -> SheetDiff {
    let columns = ColumnAligner::align(pair.reference, pair.comparison, config);
    let rows = RowAligner::align(pair, &columns, config);
    let modified_cells = CellDiffer::diff_all(&rows.pairs, &columns.common);

    ReportAssembler::sheet_diff(pair, columns, rows, modified_cells)
}
