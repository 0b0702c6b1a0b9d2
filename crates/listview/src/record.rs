//! The [`Record`] trait and the helper traits used by `#[derive(Record)]`.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::value::{Timestamp, Value};

/// Stable identity of a record, used by the selection set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        RecordKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(key: &str) -> Self {
        RecordKey(key.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(key: String) -> Self {
        RecordKey(key)
    }
}

/// A row the list view can filter, sort and select.
///
/// Usually derived:
///
/// ```
/// use listview::{Record, RecordEnum};
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Pending,
///     Received,
/// }
///
/// impl RecordEnum for Status {
///     fn label(&self) -> &str {
///         match self {
///             Status::Pending => "pending",
///             Status::Received => "received",
///         }
///     }
/// }
///
/// #[derive(Record)]
/// struct Payroll {
///     #[record(String, key)]
///     payroll_id: String,
///     #[record(Number)]
///     total_amount: u32,
///     #[record(Enum)]
///     status: Status,
///     #[record(Timestamp)]
///     processed_at: Option<i64>,
/// }
///
/// let row = Payroll {
///     payroll_id: "PR-001".into(),
///     total_amount: 1200,
///     status: Status::Pending,
///     processed_at: None,
/// };
/// assert_eq!(row.key().as_str(), "PR-001");
/// assert_eq!(Payroll::STATUS, "status");
/// ```
///
/// Manual implementations only need to map field names to [`Value`]s:
///
/// ```
/// use listview::{Record, RecordKey, Value};
///
/// struct Character {
///     id: u32,
///     name: String,
/// }
///
/// impl Record for Character {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             _ => Value::None,
///         }
///     }
///
///     fn key(&self) -> RecordKey {
///         RecordKey::new(self.id.to_string())
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of `field`, or [`Value::None`] when the record has
    /// no such field.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Stable identity of this record.
    fn key(&self) -> RecordKey;

    /// Accessor function compatible with [`Normalizer::apply_with`](crate::Normalizer::apply_with).
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Categorical enums expose a label, which is what filters compare against.
pub trait RecordEnum {
    fn label(&self) -> &str;
}

/// Text fields. Implemented for owned and optional strings.
pub trait RecordText {
    fn record_text(&self) -> Option<&str>;
}

impl RecordText for String {
    fn record_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl RecordText for &str {
    fn record_text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl<T: RecordText> RecordText for Option<T> {
    fn record_text(&self) -> Option<&str> {
        self.as_ref().and_then(|text| text.record_text())
    }
}

/// Fields that can be read as a point in time.
///
/// Plain integers are taken as milliseconds since the Unix epoch.
pub trait RecordTimestamp {
    fn record_timestamp(&self) -> Option<Timestamp>;
}

impl RecordTimestamp for i64 {
    fn record_timestamp(&self) -> Option<Timestamp> {
        Some(Timestamp(*self))
    }
}

impl RecordTimestamp for u64 {
    fn record_timestamp(&self) -> Option<Timestamp> {
        i64::try_from(*self).ok().map(Timestamp)
    }
}

impl RecordTimestamp for Timestamp {
    fn record_timestamp(&self) -> Option<Timestamp> {
        Some(*self)
    }
}

impl<Tz: TimeZone> RecordTimestamp for DateTime<Tz> {
    fn record_timestamp(&self) -> Option<Timestamp> {
        Some(Timestamp::from_datetime(self))
    }
}

impl<T: RecordTimestamp> RecordTimestamp for Option<T> {
    fn record_timestamp(&self) -> Option<Timestamp> {
        self.as_ref().and_then(|value| value.record_timestamp())
    }
}
