use serde::Deserialize;

/// A single segment of Notion rich text. Only the plain text is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
}

/// The `date` payload of a date property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

/// A select or status option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// The property types the sync job reads, tagged by Notion's `type` field.
///
/// Every other property type collapses into `Other` so an unrelated column
/// never breaks parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichTextItem>,
    },
    RichText {
        rich_text: Vec<RichTextItem>,
    },
    Url {
        url: Option<String>,
    },
    Date {
        date: Option<DateValue>,
    },
    Status {
        status: Option<SelectOption>,
    },
    #[serde(other)]
    Other,
}
