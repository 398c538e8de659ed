//! Comparison settings, fixed for the duration of one run

use crate::error::{Result, SheetdiffError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one comparison run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Pair sheets by position instead of by name
    pub compare_positionally: bool,
    /// Fold header case before matching columns
    pub case_insensitive_headers: bool,
    /// Column identifying rows across files; blank means positional row matching
    pub primary_key_column: Option<String>,
}

impl ComparisonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SheetdiffError::config(format!("Cannot read config file '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SheetdiffError::config(format!("Invalid config file '{}': {}", path.display(), e))
        })
    }

    pub fn positional(mut self, positional: bool) -> Self {
        self.compare_positionally = positional;
        self
    }

    pub fn case_insensitive_headers(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive_headers = case_insensitive;
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key_column = Some(column.into());
        self
    }

    /// The configured key column, if it names anything
    pub fn key_column(&self) -> Option<&str> {
        self.primary_key_column
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Canonical form of a header for matching
    pub fn normalize_header(&self, header: &str) -> String {
        if self.case_insensitive_headers {
            header.to_lowercase()
        } else {
            header.to_string()
        }
    }
}
