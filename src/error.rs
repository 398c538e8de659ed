//! Error types for sheetdiff operations

use crate::loader::LoadError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetdiffError>;

/// Which of the two workbooks an error or record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkbookSide {
    Reference,
    Comparison,
}

impl fmt::Display for WorkbookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbookSide::Reference => write!(f, "reference"),
            WorkbookSide::Comparison => write!(f, "comparison"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SheetdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load {side} workbook: {source}")]
    LoadFailure {
        side: WorkbookSide,
        #[source]
        source: LoadError,
    },

    #[error("The {side} workbook has no sheets; positional comparison needs at least one sheet in each workbook")]
    EmptyWorkbook { side: WorkbookSide },

    #[error("Primary key column '{column}' not found in both versions of sheet '{sheet}'")]
    PrimaryKeyNotFound { column: String, sheet: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl SheetdiffError {
    pub fn load_failure(side: WorkbookSide, source: LoadError) -> Self {
        Self::LoadFailure { side, source }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Fatal errors abort a comparison; the rest are absorbed per sheet
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::PrimaryKeyNotFound { .. })
    }
}
