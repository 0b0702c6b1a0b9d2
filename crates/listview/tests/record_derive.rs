//! Integration tests for the Record derive macro.
//!
//! These check that `#[derive(Record)]` generates accessors, keys and field
//! constants that the normalizer and controller can use directly.

#![allow(dead_code)] // some fields are intentionally not exposed

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use listview::{
    Normalizer, Number, PredicateSet, Record, RecordEnum, RecordKey, SortKey, SortSpec,
    Timestamp, Value,
};

// =============================================================================
// Basic derive
// =============================================================================

#[derive(Record)]
struct Employee {
    #[record(Number, key)]
    id: u32,

    #[record(String)]
    name: String,

    #[record(Bool)]
    active: bool,

    internal_note: String,
}

fn employee(id: u32, name: &str) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        active: true,
        internal_note: String::new(),
    }
}

#[test]
fn fields_are_exposed() {
    let e = employee(7, "Alice");

    assert_eq!(e.field_value("name"), Value::String("Alice"));
    assert_eq!(e.field_value("id"), Value::Number(Number::U64(7)));
    assert_eq!(e.field_value("active"), Value::Bool(true));
}

#[test]
fn unexposed_fields_read_as_none() {
    let e = employee(7, "Alice");

    assert_eq!(e.field_value("internal_note"), Value::None);
    assert_eq!(e.field_value("unknown"), Value::None);
    assert_eq!(e.field_value(""), Value::None);
}

#[test]
fn key_uses_to_string() {
    assert_eq!(employee(42, "Bob").key(), RecordKey::from("42"));
}

#[test]
fn field_constants() {
    assert_eq!(Employee::ID, "id");
    assert_eq!(Employee::NAME, "name");
    assert_eq!(Employee::ACTIVE, "active");
}

#[test]
fn accessor_function() {
    let e = employee(1, "Carol");
    assert_eq!(Employee::accessor(&e, Employee::NAME), Value::String("Carol"));
}

// =============================================================================
// Enums, optional text, timestamps, rename
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Alive,
    Dead,
    Unknown,
}

impl RecordEnum for Status {
    fn label(&self) -> &str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }
}

#[derive(Record)]
struct Character {
    #[record(key)]
    id: u64,

    #[record(String)]
    name: String,

    #[record(String, rename = "type")]
    kind: Option<String>,

    #[record(Enum)]
    status: Status,

    #[record(Timestamp)]
    created: DateTime<Utc>,

    #[record(Timestamp, rename = "lastSeen")]
    last_seen: Option<i64>,

    #[record(skip)]
    image: String,
}

fn character() -> Character {
    Character {
        id: 1,
        name: "Rick Sanchez".to_string(),
        kind: None,
        status: Status::Alive,
        created: Utc.with_ymd_and_hms(2017, 11, 4, 18, 48, 46).unwrap(),
        last_seen: Some(1_000),
        image: "rick.jpeg".to_string(),
    }
}

#[test]
fn key_only_field_is_not_a_column() {
    let c = character();
    assert_eq!(c.key(), RecordKey::from("1"));
    assert_eq!(c.field_value("id"), Value::None);
}

#[test]
fn enum_reads_label() {
    assert_eq!(character().field_value(Character::STATUS), Value::Enum("Alive"));
}

#[test]
fn optional_text_reads_none_when_missing() {
    let mut c = character();
    assert_eq!(c.field_value("type"), Value::None);

    c.kind = Some("Parasite".to_string());
    assert_eq!(c.field_value(Character::TYPE), Value::String("Parasite"));
}

#[test]
fn timestamps_from_datetime_and_millis() {
    let c = character();
    assert_eq!(
        c.field_value("created"),
        Value::Timestamp(Timestamp(1_509_821_326_000))
    );
    assert_eq!(c.field_value("lastSeen"), Value::Timestamp(Timestamp(1_000)));
    assert_eq!(Character::LAST_SEEN, "lastSeen");
}

#[test]
fn skipped_field_has_no_value() {
    assert_eq!(character().field_value("image"), Value::None);
}

// =============================================================================
// Derived records through the normalizer
// =============================================================================

#[test]
fn derived_records_filter_and_sort() {
    let staff = vec![
        employee(1, "Bob"),
        employee(2, "Alice"),
        employee(3, "Malik"),
    ];
    let now: DateTime<FixedOffset> = Utc::now().into();

    let view = Normalizer::new([Employee::NAME]).apply(
        &staff,
        &PredicateSet::new().search("li"),
        &SortSpec::new().then(SortKey::asc(Employee::NAME)),
        now,
    );

    let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Malik"]);
}
