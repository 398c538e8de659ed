//! Workbook loading via calamine

use crate::value::CellValue;
use crate::workbook::{Sheet, Workbook};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;

/// Why a workbook could not be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    UnsupportedFormat,
    PasswordProtected,
    Corrupt,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorKind::NotFound => write!(f, "file not found"),
            LoadErrorKind::UnsupportedFormat => write!(f, "unsupported format"),
            LoadErrorKind::PasswordProtected => write!(f, "password-protected file"),
            LoadErrorKind::Corrupt => write!(f, "corrupt or unreadable file"),
        }
    }
}

#[derive(Error, Debug, Clone)]
#[error("{kind}: {message}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify a backend error by its message
    fn from_calamine(error: calamine::Error, origin: &str) -> Self {
        let message = error.to_string();
        let lower = message.to_lowercase();

        let kind = if lower.contains("password") || lower.contains("encrypt") {
            LoadErrorKind::PasswordProtected
        } else if lower.contains("cannot detect")
            || lower.contains("unsupported")
            || lower.contains("unrecognized")
            || lower.contains("unknown format")
        {
            LoadErrorKind::UnsupportedFormat
        } else {
            LoadErrorKind::Corrupt
        };

        Self::new(kind, format!("{}: {}", origin, message))
    }
}

/// File extensions calamine can open
pub fn is_supported_format(path: &Path) -> bool {
    if let Some(extension) = path.extension().and_then(|s| s.to_str()) {
        matches!(
            extension.to_lowercase().as_str(),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "xlam" | "ods"
        )
    } else {
        false
    }
}

/// Load a workbook from disk
pub fn load_workbook(path: &Path) -> Result<Workbook, LoadError> {
    if !path.exists() {
        return Err(LoadError::new(
            LoadErrorKind::NotFound,
            format!("{}", path.display()),
        ));
    }

    if !is_supported_format(path) {
        return Err(LoadError::new(
            LoadErrorKind::UnsupportedFormat,
            format!("{} (expected .xlsx, .xlsm, .xlsb, .xls or .ods)", path.display()),
        ));
    }

    let origin = path.display().to_string();
    let sheets = open_workbook_auto(path).map_err(|e| LoadError::from_calamine(e, &origin))?;
    let workbook = read_sheets(sheets, &origin)?;

    log::info!(
        "Loaded workbook {} ({} sheets)",
        origin,
        workbook.sheet_count()
    );
    Ok(workbook)
}

/// Load a workbook from in-memory file contents, detecting the format
pub fn load_workbook_from_bytes(bytes: Vec<u8>) -> Result<Workbook, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::new(LoadErrorKind::Corrupt, "empty input"));
    }

    let origin = "<memory>";
    let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| LoadError::from_calamine(e, origin))?;
    read_sheets(sheets, origin)
}

fn read_sheets<RS: Read + Seek>(mut sheets: Sheets<RS>, origin: &str) -> Result<Workbook, LoadError> {
    let sheet_names = sheets.sheet_names().to_vec();
    let mut out = Vec::with_capacity(sheet_names.len());

    for sheet_name in sheet_names {
        let range = sheets
            .worksheet_range(&sheet_name)
            .map_err(|e| LoadError::from_calamine(e, &format!("{} [{}]", origin, sheet_name)))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| match data_to_value(cell) {
                    CellValue::Empty => String::new(),
                    value => value.to_string(),
                })
                .collect(),
            None => Vec::new(),
        };

        let data_rows: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(data_to_value).collect())
            .collect();

        log::debug!(
            "Read sheet '{}': {} columns, {} rows",
            sheet_name,
            headers.len(),
            data_rows.len()
        );
        out.push(Sheet::new(sheet_name, headers, data_rows));
    }

    Ok(Workbook::new(out))
}

/// Convert a calamine cell into a typed value
fn data_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
            Some(duration) => CellValue::Text(format_duration(duration)),
            None => CellValue::Text(dt.as_f64().to_string()),
        },
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(ndt) => CellValue::Date(ndt),
            None => CellValue::Text(s.clone()),
        },
        Data::Error(e) => CellValue::Text(e.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Elapsed time as `[-]h:mm:ss`, hours not wrapped at 24
fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!("{}{}:{:02}:{:02}", sign, total / 3600, (total / 60) % 60, total % 60)
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim_end_matches('Z');
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
