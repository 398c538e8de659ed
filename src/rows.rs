//! Row alignment: pair data rows by primary key or by position

use crate::columns::{ColumnAlignment, CommonColumn};
use crate::config::ComparisonConfig;
use crate::error::{Result, SheetdiffError};
use crate::sheets::SheetPair;
use crate::value::{CellValue, KeyValue};
use crate::workbook::Row;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// How rows of a sheet pair were matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowMatching {
    PrimaryKey { column: String },
    Positional { fallback_reason: Option<String> },
}

/// Identity of a matched row in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowIdentity {
    /// Primary-key value
    Key(CellValue),
    /// 1-based data row number
    Position(usize),
}

impl fmt::Display for RowIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIdentity::Key(value) => write!(f, "{}", value),
            RowIdentity::Position(n) => write!(f, "row {}", n),
        }
    }
}

/// A reference row matched with a comparison row
#[derive(Debug, Clone)]
pub struct RowPair<'a> {
    pub identity: RowIdentity,
    pub reference: &'a Row,
    pub comparison: &'a Row,
}

#[derive(Debug, Clone)]
pub struct RowAlignment<'a> {
    pub matching: RowMatching,
    pub pairs: Vec<RowPair<'a>>,
    /// Rows only in the comparison sheet
    pub new_rows: Vec<&'a Row>,
    /// Rows only in the reference sheet
    pub deleted_rows: Vec<&'a Row>,
}

/// Rows of one sheet indexed by key value; later rows overwrite earlier ones with the same key
struct KeyIndex<'a> {
    rows: IndexMap<KeyValue, &'a Row>,
    unkeyed: Vec<&'a Row>,
    shadowed: usize,
}

impl<'a> KeyIndex<'a> {
    fn build(rows: &'a [Row], column: &str) -> Self {
        let mut index = KeyIndex {
            rows: IndexMap::with_capacity(rows.len()),
            unkeyed: Vec::new(),
            shadowed: 0,
        };

        for row in rows {
            match row.get(column).key() {
                Some(key) => {
                    // last write wins
                    if index.rows.insert(key, row).is_some() {
                        index.shadowed += 1;
                    }
                }
                None => index.unkeyed.push(row),
            }
        }

        index
    }

    fn sorted_keys(&self) -> Vec<&KeyValue> {
        let mut keys: Vec<&KeyValue> = self.rows.keys().collect();
        keys.sort();
        keys
    }
}

pub struct RowAligner;

impl RowAligner {
    /// Pair rows of a sheet pair, by primary key when one is configured and usable
    pub fn align<'a>(
        pair: &SheetPair<'a>,
        columns: &ColumnAlignment,
        config: &ComparisonConfig,
    ) -> RowAlignment<'a> {
        if config.key_column().is_none() {
            return Self::align_by_position(pair, None);
        }

        match Self::key_column(pair, columns, config) {
            Ok(column) => Self::align_by_key(pair, column),
            Err(e) => {
                log::warn!("{}; matching rows by position instead", e);
                Self::align_by_position(pair, Some(e.to_string()))
            }
        }
    }

    /// Resolve the configured key among the common columns
    pub fn key_column<'c>(
        pair: &SheetPair<'_>,
        columns: &'c ColumnAlignment,
        config: &ComparisonConfig,
    ) -> Result<&'c CommonColumn> {
        let wanted = config.key_column().unwrap_or_default();
        columns
            .find(&config.normalize_header(wanted))
            .ok_or_else(|| SheetdiffError::PrimaryKeyNotFound {
                column: wanted.to_string(),
                sheet: pair.label.to_string(),
            })
    }

    fn align_by_key<'a>(pair: &SheetPair<'a>, column: &CommonColumn) -> RowAlignment<'a> {
        let reference = KeyIndex::build(&pair.reference.rows, &column.reference);
        let comparison = KeyIndex::build(&pair.comparison.rows, &column.comparison);

        if reference.shadowed > 0 || comparison.shadowed > 0 {
            log::warn!(
                "Sheet '{}': duplicate values in key column '{}' ({} in reference, {} in comparison); the last row for each key is used",
                pair.label,
                column.reference,
                reference.shadowed,
                comparison.shadowed
            );
        }

        let mut pairs = Vec::new();
        let mut deleted_rows = Vec::new();
        for key in reference.sorted_keys() {
            let reference_row = reference.rows[key];
            match comparison.rows.get(key) {
                Some(comparison_row) => pairs.push(RowPair {
                    identity: RowIdentity::Key(key.to_cell_value()),
                    reference: reference_row,
                    comparison: *comparison_row,
                }),
                None => deleted_rows.push(reference_row),
            }
        }
        deleted_rows.extend(reference.unkeyed.iter().copied());

        let mut new_rows: Vec<&Row> = comparison
            .sorted_keys()
            .into_iter()
            .filter(|key| !reference.rows.contains_key(*key))
            .map(|key| comparison.rows[key])
            .collect();
        new_rows.extend(comparison.unkeyed.iter().copied());

        log::debug!(
            "Sheet '{}': {} rows matched on '{}', {} new, {} deleted",
            pair.label,
            pairs.len(),
            column.reference,
            new_rows.len(),
            deleted_rows.len()
        );

        RowAlignment {
            matching: RowMatching::PrimaryKey {
                column: column.reference.clone(),
            },
            pairs,
            new_rows,
            deleted_rows,
        }
    }

    fn align_by_position<'a>(pair: &SheetPair<'a>, fallback_reason: Option<String>) -> RowAlignment<'a> {
        let reference = &pair.reference.rows;
        let comparison = &pair.comparison.rows;
        let paired = reference.len().min(comparison.len());

        let pairs = reference
            .iter()
            .zip(comparison.iter())
            .map(|(r, c)| RowPair {
                identity: RowIdentity::Position(r.display_number()),
                reference: r,
                comparison: c,
            })
            .collect();

        log::debug!(
            "Sheet '{}': {} rows paired by position, {} new, {} deleted",
            pair.label,
            paired,
            comparison.len() - paired,
            reference.len() - paired
        );

        RowAlignment {
            matching: RowMatching::Positional { fallback_reason },
            pairs,
            new_rows: comparison[paired..].iter().collect(),
            deleted_rows: reference[paired..].iter().collect(),
        }
    }
}
