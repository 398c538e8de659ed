//! Typed cell values and the equality rules used when diffing them

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Scalar value held by a spreadsheet cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl CellValue {
    /// Collapse every representation of "no value" into `Empty`
    pub fn normalized(&self) -> CellValue {
        match self {
            CellValue::Text(s) if s.is_empty() => CellValue::Empty,
            CellValue::Number(n) if n.is_nan() => CellValue::Empty,
            other => other.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.normalized(), CellValue::Empty)
    }

    /// Cell equality as the differ sees it.
    ///
    /// Both sides are normalized first. Numbers compare by value, so `1` and
    /// `1.0` are the same; every other variant compares exactly and values of
    /// different variants are never equal. Text comparison is case-sensitive.
    pub fn same_as(&self, other: &CellValue) -> bool {
        match (self.normalized(), other.normalized()) {
            (CellValue::Empty, CellValue::Empty) => true,
            (CellValue::Number(a), CellValue::Number(b)) => a == b,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            _ => false,
        }
    }

    /// Hashable key for primary-key matching; `None` for empty values
    pub fn key(&self) -> Option<KeyValue> {
        match self.normalized() {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(KeyValue::Number(normalize_float_bits(n))),
            CellValue::Text(s) => Some(KeyValue::Text(s)),
            CellValue::Bool(b) => Some(KeyValue::Bool(b)),
            CellValue::Date(d) => Some(KeyValue::Date(d)),
        }
    }
}

fn normalize_float_bits(n: f64) -> u64 {
    // -0.0 and 0.0 must hash alike
    if n == 0.0 {
        0.0f64.to_bits()
    } else {
        n.to_bits()
    }
}

fn whole_number(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

fn format_date(d: &NaiveDateTime) -> String {
    if d.time() == NaiveTime::MIN {
        d.format("%Y-%m-%d").to_string()
    } else {
        d.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => match whole_number(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", format_date(d)),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.normalized() {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(&s),
            CellValue::Number(n) => match whole_number(n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n),
            },
            CellValue::Bool(b) => serializer.serialize_bool(b),
            CellValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value.and_time(NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Hashable projection of a non-empty cell value, used to index rows by primary key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Number(u64),
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
}

impl KeyValue {
    pub fn to_cell_value(&self) -> CellValue {
        match self {
            KeyValue::Number(bits) => CellValue::Number(f64::from_bits(*bits)),
            KeyValue::Text(s) => CellValue::Text(s.clone()),
            KeyValue::Bool(b) => CellValue::Bool(*b),
            KeyValue::Date(d) => CellValue::Date(*d),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            KeyValue::Number(_) => 0,
            KeyValue::Text(_) => 1,
            KeyValue::Bool(_) => 2,
            KeyValue::Date(_) => 3,
        }
    }
}

/// Numbers sort before text, text before booleans, booleans before dates
impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyValue::Number(a), KeyValue::Number(b)) => f64::from_bits(*a).total_cmp(&f64::from_bits(*b)),
            (KeyValue::Text(a), KeyValue::Text(b)) => a.cmp(b),
            (KeyValue::Bool(a), KeyValue::Bool(b)) => a.cmp(b),
            (KeyValue::Date(a), KeyValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell_value())
    }
}
