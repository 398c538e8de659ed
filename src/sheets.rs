//! Sheet alignment: decide which reference sheet is compared with which comparison sheet

use crate::config::ComparisonConfig;
use crate::error::{Result, SheetdiffError, WorkbookSide};
use crate::workbook::{Sheet, Workbook};
use std::collections::HashSet;

/// A reference sheet matched with a comparison sheet
#[derive(Debug, Clone, Copy)]
pub struct SheetPair<'a> {
    /// Identifier used as the key in the report
    pub label: &'a str,
    pub reference: &'a Sheet,
    pub comparison: &'a Sheet,
}

/// Sheet partitions for one comparison
#[derive(Debug, Clone, Default)]
pub struct SheetAlignment {
    /// (label, reference index, comparison index), in reference order
    pub common: Vec<(String, usize, usize)>,
    pub only_in_reference: Vec<String>,
    pub only_in_comparison: Vec<String>,
}

impl SheetAlignment {
    pub fn pairs<'a>(&'a self, reference: &'a Workbook, comparison: &'a Workbook) -> Vec<SheetPair<'a>> {
        self.common
            .iter()
            .map(|(label, r, c)| SheetPair {
                label: label.as_str(),
                reference: &reference.sheets[*r],
                comparison: &comparison.sheets[*c],
            })
            .collect()
    }

    pub fn common_labels(&self) -> Vec<String> {
        self.common.iter().map(|(label, _, _)| label.clone()).collect()
    }
}

pub struct SheetAligner;

impl SheetAligner {
    /// Partition the sheets of both workbooks according to the configured mode
    pub fn align(
        reference: &Workbook,
        comparison: &Workbook,
        config: &ComparisonConfig,
    ) -> Result<SheetAlignment> {
        if config.compare_positionally {
            Self::align_by_position(reference, comparison)
        } else {
            Ok(Self::align_by_name(reference, comparison))
        }
    }

    /// Exact, case-sensitive name matching; sheet order is not a signal
    fn align_by_name(reference: &Workbook, comparison: &Workbook) -> SheetAlignment {
        let mut alignment = SheetAlignment::default();
        let reference_names: HashSet<&str> = reference.sheets.iter().map(|s| s.name.as_str()).collect();

        for (r, sheet) in reference.sheets.iter().enumerate() {
            match comparison.sheets.iter().position(|s| s.name == sheet.name) {
                Some(c) => alignment.common.push((sheet.name.clone(), r, c)),
                None => alignment.only_in_reference.push(sheet.name.clone()),
            }
        }

        alignment.only_in_comparison = comparison
            .sheets
            .iter()
            .filter(|s| !reference_names.contains(s.name.as_str()))
            .map(|s| s.name.clone())
            .collect();

        log::debug!(
            "Sheets by name: {} common, {} only in reference, {} only in comparison",
            alignment.common.len(),
            alignment.only_in_reference.len(),
            alignment.only_in_comparison.len()
        );
        alignment
    }

    /// Pair sheet i with sheet i, ignoring names
    fn align_by_position(reference: &Workbook, comparison: &Workbook) -> Result<SheetAlignment> {
        if reference.is_empty() {
            return Err(SheetdiffError::EmptyWorkbook {
                side: WorkbookSide::Reference,
            });
        }
        if comparison.is_empty() {
            return Err(SheetdiffError::EmptyWorkbook {
                side: WorkbookSide::Comparison,
            });
        }

        let paired = reference.sheet_count().min(comparison.sheet_count());
        let mut alignment = SheetAlignment::default();

        for i in 0..paired {
            let ref_name = &reference.sheets[i].name;
            let comp_name = &comparison.sheets[i].name;
            let label = if ref_name == comp_name {
                positional_label(i, ref_name)
            } else {
                format!("{} / {}", positional_label(i, ref_name), comp_name)
            };
            alignment.common.push((label, i, i));
        }

        alignment.only_in_reference = reference.sheets[paired..]
            .iter()
            .enumerate()
            .map(|(offset, s)| positional_label(paired + offset, &s.name))
            .collect();
        alignment.only_in_comparison = comparison.sheets[paired..]
            .iter()
            .enumerate()
            .map(|(offset, s)| positional_label(paired + offset, &s.name))
            .collect();

        log::debug!(
            "Sheets by position: {} paired, {} extra in reference, {} extra in comparison",
            paired,
            alignment.only_in_reference.len(),
            alignment.only_in_comparison.len()
        );
        Ok(alignment)
    }
}

fn positional_label(index: usize, name: &str) -> String {
    format!("#{} {}", index + 1, name)
}
