//! Field values read out of records.
//!
//! A [`Value`] is what the normalizer sees when it asks a record for one of
//! its columns. It borrows from the record, so reading a field never clones.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, TimeZone};

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use listview::{Number, Value};
///
/// struct Employee {
///     name: String,
///     salary: u32,
/// }
///
/// fn accessor<'a>(employee: &'a Employee, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&employee.name),
///         "salary" => Value::Number(Number::from(employee.salary)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Free text.
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Point in time (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Categorical value, carried as its label (e.g. `"pending"`).
    Enum(&'a str),
    /// Boolean value.
    Bool(bool),
    /// Field absent, null, or not exposed.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// `None` or a NaN number. Both sort after every present value.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::None => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Text that free-text search is matched against.
    ///
    /// Strings and categorical labels are borrowed; numbers and booleans
    /// are rendered. Timestamps and missing values are not searchable.
    pub fn search_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(Cow::Borrowed(*s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Timestamp(_) | Value::None => None,
        }
    }

    /// Label used for categorical equality. Only text-like values qualify.
    pub fn category(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(Cow::Borrowed(*s)),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Timestamp(_) | Value::None => None,
        }
    }
}

/// Numeric field value.
///
/// Integers keep their precision; mixed comparisons fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Total order over numbers. NaN sorts after everything else.
    pub fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            (Number::I64(a), Number::U64(b)) => i128::from(a).cmp(&i128::from(b)),
            (Number::U64(a), Number::I64(b)) => i128::from(a).cmp(&i128::from(b)),
            _ => match (self.is_nan(), other.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.to_f64().total_cmp(&other.to_f64()),
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Converts any timezone-aware datetime.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp::from_datetime(&dt)
    }
}
