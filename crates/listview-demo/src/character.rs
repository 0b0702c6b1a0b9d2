//! Character pages as served by the Rick and Morty API.
//!
//! The demo reads a saved page from disk instead of fetching it; the JSON
//! shape is the same.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::DateTime;
use listview::{Column, Number, Record, RecordKey, Timestamp, Value, ViewConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: Location,
    pub location: Location,
    pub image: String,
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u64,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of results from the character endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

impl CharacterPage {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid character page")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }
}

impl Character {
    pub const NAME: &'static str = "name";
    pub const ORIGIN: &'static str = "origin";
    pub const EPISODES: &'static str = "episodes";
    pub const STATUS: &'static str = "status";
    pub const SPECIES: &'static str = "species";
    pub const CREATED: &'static str = "created";
}

impl Record for Character {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            Self::NAME => Value::String(&self.name),
            Self::ORIGIN => Value::String(&self.origin.name),
            Self::EPISODES => Value::Number(Number::from(self.episode.len())),
            Self::STATUS => Value::Enum(&self.status),
            Self::SPECIES => Value::String(&self.species),
            Self::CREATED => DateTime::parse_from_rfc3339(&self.created)
                .map(|at| Value::Timestamp(Timestamp::from_datetime(&at)))
                .unwrap_or(Value::None),
            _ => Value::None,
        }
    }

    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.to_string())
    }
}

/// Table layout for characters: name search, status filter, no selection.
pub fn config() -> ViewConfig {
    ViewConfig::new([
        Column::new(Character::NAME).label("Name"),
        Column::new(Character::ORIGIN).label("Origin"),
        Column::new(Character::EPISODES).label("Episodes"),
        Column::new(Character::STATUS).label("Status"),
        Column::new(Character::SPECIES).label("Species").hidden(),
        Column::new(Character::CREATED).label("Created").hidden(),
    ])
    .with_searchable([Character::NAME, Character::SPECIES])
    .with_categorical([Character::STATUS])
    .with_timestamp_field(Character::CREATED)
}
