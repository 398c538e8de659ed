//! Cell-level comparison of matched rows

use crate::columns::CommonColumn;
use crate::rows::{RowIdentity, RowPair};
use crate::value::CellValue;
use serde::Serialize;

/// One modified cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellChange {
    pub row: RowIdentity,
    /// Normalized header, the same whichever file is the reference
    pub column: String,
    pub reference_column: String,
    pub comparison_column: String,
    pub old_value: CellValue,
    pub new_value: CellValue,
}

pub struct CellDiffer;

impl CellDiffer {
    /// Compare one matched row pair over the common columns
    pub fn diff_rows(pair: &RowPair<'_>, common_columns: &[CommonColumn]) -> Vec<CellChange> {
        common_columns
            .iter()
            .filter_map(|column| {
                let old_value = pair.reference.get(&column.reference);
                let new_value = pair.comparison.get(&column.comparison);

                if old_value.same_as(new_value) {
                    None
                } else {
                    Some(CellChange {
                        row: pair.identity.clone(),
                        column: column.normalized.clone(),
                        reference_column: column.reference.clone(),
                        comparison_column: column.comparison.clone(),
                        old_value: old_value.normalized(),
                        new_value: new_value.normalized(),
                    })
                }
            })
            .collect()
    }

    /// Compare every matched row pair, keeping pair order then column order
    pub fn diff_all(pairs: &[RowPair<'_>], common_columns: &[CommonColumn]) -> Vec<CellChange> {
        pairs
            .iter()
            .flat_map(|pair| Self::diff_rows(pair, common_columns))
            .collect()
    }
}
