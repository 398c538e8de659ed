//! Column alignment: header presence and header order between two versions of a sheet

use crate::config::ComparisonConfig;
use crate::workbook::Sheet;
use indexmap::IndexMap;
use serde::Serialize;

/// A column present in both sheets, with each file's own spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonColumn {
    pub normalized: String,
    pub reference: String,
    pub comparison: String,
}

/// Common headers in each file's relative order, reported when they disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOrderChange {
    pub reference: Vec<String>,
    pub comparison: Vec<String>,
}

/// Header differences for one sheet pair
#[derive(Debug, Clone, Default)]
pub struct ColumnAlignment {
    /// Common columns in reference order
    pub common: Vec<CommonColumn>,
    pub only_in_reference: Vec<String>,
    pub only_in_comparison: Vec<String>,
    pub order_change: Option<ColumnOrderChange>,
}

impl ColumnAlignment {
    pub fn order_mismatch(&self) -> bool {
        self.order_change.is_some()
    }

    /// Find a common column by its normalized name
    pub fn find(&self, normalized: &str) -> Option<&CommonColumn> {
        self.common.iter().find(|c| c.normalized == normalized)
    }
}

pub struct ColumnAligner;

impl ColumnAligner {
    pub fn align(reference: &Sheet, comparison: &Sheet, config: &ComparisonConfig) -> ColumnAlignment {
        let reference_headers = Self::index_headers(reference, config);
        let comparison_headers = Self::index_headers(comparison, config);

        let common: Vec<CommonColumn> = reference_headers
            .iter()
            .filter_map(|(normalized, original)| {
                comparison_headers.get(normalized).map(|other| CommonColumn {
                    normalized: normalized.clone(),
                    reference: original.clone(),
                    comparison: other.clone(),
                })
            })
            .collect();

        let only_in_reference = reference_headers
            .iter()
            .filter(|(normalized, _)| !comparison_headers.contains_key(*normalized))
            .map(|(_, original)| original.clone())
            .collect();

        let only_in_comparison = comparison_headers
            .iter()
            .filter(|(normalized, _)| !reference_headers.contains_key(*normalized))
            .map(|(_, original)| original.clone())
            .collect();

        // Reference order of the common headers is the order of `common`
        let comparison_order: Vec<&String> = comparison_headers
            .keys()
            .filter(|normalized| reference_headers.contains_key(*normalized))
            .collect();

        let in_same_order = common
            .iter()
            .zip(comparison_order.iter())
            .all(|(column, normalized)| &column.normalized == *normalized);

        let order_change = if in_same_order {
            None
        } else {
            let comparison_spelling: Vec<String> = comparison_order
                .iter()
                .map(|normalized| comparison_headers[*normalized].clone())
                .collect();
            Some(ColumnOrderChange {
                reference: common.iter().map(|c| c.reference.clone()).collect(),
                comparison: comparison_spelling,
            })
        };

        log::debug!(
            "Sheet '{}': {} common columns, {} only in reference, {} only in comparison, order {}",
            reference.name,
            common.len(),
            reference_headers.len() - common.len(),
            comparison_headers.len() - common.len(),
            if order_change.is_some() { "changed" } else { "unchanged" }
        );

        ColumnAlignment {
            common,
            only_in_reference,
            only_in_comparison,
            order_change,
        }
    }

    /// Map normalized header to original spelling, keeping the first of any folded duplicates
    fn index_headers(sheet: &Sheet, config: &ComparisonConfig) -> IndexMap<String, String> {
        let mut headers = IndexMap::with_capacity(sheet.headers.len());
        for header in &sheet.headers {
            let normalized = config.normalize_header(header);
            if let Some(first) = headers.get(&normalized) {
                log::warn!(
                    "Sheet '{}': header '{}' duplicates '{}' after case folding and is ignored",
                    sheet.name,
                    header,
                    first
                );
                continue;
            }
            headers.insert(normalized, header.clone());
        }
        headers
    }
}
