//! # Record Model
//!
//! The single resource type managed by the dashboard, plus the field
//! names the editor form is allowed to touch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned record identifier. `0` means "not stored yet".
pub type RecordId = u64;

/// Identifier carried by a record that has not been created yet
pub const NEW_RECORD_ID: RecordId = 0;

/// A record as exchanged with the remote store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned id, absent on the wire for unsaved records
    #[serde(default)]
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record {
    /// Create an empty record that has never been stored
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether this record still needs a store-assigned id
    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }

    /// Read a field as text; a missing image reads as the empty string
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Title => &self.title,
            RecordField::Description => &self.description,
            RecordField::Location => &self.location,
            RecordField::Image => self.image.as_deref().unwrap_or(""),
        }
    }

    /// Overwrite a field. An empty image value clears the image.
    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RecordField::Title => self.title = value,
            RecordField::Description => self.description = value,
            RecordField::Location => self.location = value,
            RecordField::Image => {
                self.image = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
        }
    }

    /// Required fields that are empty or whitespace-only, in form order
    pub fn missing_required_fields(&self) -> Vec<RecordField> {
        RecordField::REQUIRED
            .iter()
            .copied()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }
}

/// Editable fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Title,
    Description,
    Location,
    Image,
}

impl RecordField {
    /// All editable fields in form order
    pub const ALL: [RecordField; 4] = [
        RecordField::Title,
        RecordField::Description,
        RecordField::Location,
        RecordField::Image,
    ];

    /// Fields that must be non-empty before a draft can be submitted
    pub const REQUIRED: [RecordField; 3] = [
        RecordField::Title,
        RecordField::Description,
        RecordField::Location,
    ];

    /// Wire and form name of the field
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Title => "title",
            RecordField::Description => "description",
            RecordField::Location => "location",
            RecordField::Image => "image",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, RecordField::Image)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a field name does not match any editable field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
