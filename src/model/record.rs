use super::property_value::PropertyValue;
use crate::constants::{STATUS_NEW, STATUS_PROPERTY, STATUS_UPLOADED};
use crate::error::TransformError;
use crate::types::PageId;
use serde::Deserialize;
use std::collections::HashMap;

/// Where a record sits in the sync workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    New,
    Uploaded,
    Other(String),
    /// The status property is missing or empty.
    Unset,
}

impl RecordStatus {
    pub fn from_name(name: &str) -> Self {
        match name {
            STATUS_NEW => RecordStatus::New,
            STATUS_UPLOADED => RecordStatus::Uploaded,
            other => RecordStatus::Other(other.to_string()),
        }
    }
}

/// One page of a Notion database.
///
/// Properties and `created_time` are checked by the transformer rather than
/// here, so a malformed record fails only its own page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRecord {
    pub id: PageId,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl SourceRecord {
    /// Parses the named property into its typed form.
    pub fn property(&self, name: &str) -> Result<PropertyValue, TransformError> {
        let raw = self
            .properties
            .get(name)
            .ok_or_else(|| TransformError::MissingField {
                record: self.id.to_string(),
                field: name.to_string(),
            })?;

        serde_json::from_value(raw.clone()).map_err(|_| TransformError::UnexpectedShape {
            record: self.id.to_string(),
            field: name.to_string(),
            expected: "a Notion property object",
        })
    }

    /// The current workflow status of the record.
    pub fn status(&self) -> RecordStatus {
        match self.property(STATUS_PROPERTY) {
            Ok(PropertyValue::Status {
                status: Some(option),
            }) => RecordStatus::from_name(&option.name),
            _ => RecordStatus::Unset,
        }
    }
}

/// One page of results from a database query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncPage {
    pub results: Vec<SourceRecord>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl SyncPage {
    /// The cursor for the following page, if the source reports one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}
