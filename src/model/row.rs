use serde::Serialize;

/// A row as upserted into a Supabase table.
///
/// `date` and `authors` are only present for the papers table; they are left
/// out of the JSON entirely otherwise so links rows carry only their columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationRow {
    pub title: String,
    pub url: String,
    pub notion_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
}
