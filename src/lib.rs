//! # sheetdiff
//!
//! A workbook comparison tool that reports sheet, column, row and cell
//! level differences between a reference spreadsheet and a comparison
//! spreadsheet.

pub mod cli;
pub mod error;
pub mod value;
pub mod workbook;
pub mod loader;
pub mod config;
pub mod sheets;
pub mod columns;
pub mod rows;
pub mod cells;
pub mod report;
pub mod compare;
pub mod commands;
pub mod output;
pub mod progress;

pub use compare::compare;
pub use config::ComparisonConfig;
pub use error::{Result, SheetdiffError, WorkbookSide};
pub use loader::{load_workbook, load_workbook_from_bytes, LoadError};
pub use report::{ComparisonReport, SheetDiff};
pub use value::CellValue;
pub use workbook::{Row, Sheet, Workbook};
