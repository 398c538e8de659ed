//! In-memory workbook model consumed by the comparison engine

use crate::value::CellValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered collection of sheets, read-only once loaded
#[derive(Debug, Clone, Default, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// A named table: one header row followed by data rows
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Build a sheet from raw header and row values.
    ///
    /// Headers are sanitized the way pandas reads a header row: blank cells
    /// become `Unnamed: <col>` and repeated names get `.1`, `.2`, ... suffixes.
    /// Rows shorter than the header are padded with `Empty`; extra values are dropped.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let name = name.into();
        let headers = sanitize_headers(headers);

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                if values.len() > headers.len() {
                    log::debug!(
                        "Sheet '{}' row {} has {} values for {} headers; extra values dropped",
                        name,
                        index + 1,
                        values.len(),
                        headers.len()
                    );
                }
                let mut values = values.into_iter();
                let cells = headers
                    .iter()
                    .map(|h| (h.clone(), values.next().unwrap_or_default()))
                    .collect();
                Row { index, cells }
            })
            .collect();

        Self { name, headers, rows }
    }

    /// Convenience constructor for tests and programmatic callers
    pub fn from_values<H, V>(name: &str, headers: &[H], rows: Vec<Vec<V>>) -> Self
    where
        H: AsRef<str>,
        V: Into<CellValue>,
    {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(name, headers, rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One data row, addressed by header name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// 0-based position among the sheet's data rows
    pub index: usize,
    pub cells: IndexMap<String, CellValue>,
}

impl Row {
    pub fn get(&self, header: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(header).unwrap_or(&EMPTY)
    }

    /// 1-based row number as a spreadsheet shows it, header row excluded
    pub fn display_number(&self) -> usize {
        self.index + 1
    }
}

fn sanitize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());

    for (col, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", col)
        } else {
            header
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
