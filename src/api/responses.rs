// src/api/responses.rs
//! Request bodies sent to the Notion API.
//!
//! Responses are decoded straight into `model` types; only the error body
//! reuses notion-client's serde implementation.

use crate::constants::STATUS_PROPERTY;
use serde::Serialize;

pub use notion_client::objects::error::Error as NotionError;

/// Body of `POST databases/{id}/query` filtered on one status value.
#[derive(Debug, Clone, Serialize)]
pub struct StatusQuery<'a> {
    pub filter: StatusFilter<'a>,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusFilter<'a> {
    pub property: &'static str,
    pub status: StatusEquals<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusEquals<'a> {
    pub equals: &'a str,
}

impl<'a> StatusQuery<'a> {
    pub fn new(status: &'a str, page_size: usize, start_cursor: Option<&'a str>) -> Self {
        Self {
            filter: StatusFilter {
                property: STATUS_PROPERTY,
                status: StatusEquals { equals: status },
            },
            page_size,
            start_cursor,
        }
    }
}

/// Body of `PATCH pages/{id}` setting the status property.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate<'a> {
    properties: std::collections::HashMap<&'static str, StatusProperty<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct StatusProperty<'a> {
    status: StatusName<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct StatusName<'a> {
    name: &'a str,
}

impl<'a> StatusUpdate<'a> {
    pub fn new(status: &'a str) -> Self {
        let mut properties = std::collections::HashMap::new();
        properties.insert(
            STATUS_PROPERTY,
            StatusProperty {
                status: StatusName { name: status },
            },
        );
        Self { properties }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_body_matches_notion_filter_shape() {
        let body = serde_json::to_value(StatusQuery::new("New", 100, None)).unwrap();
        assert_eq!(
            body,
            json!({
                "filter": {"property": "Status", "status": {"equals": "New"}},
                "page_size": 100
            })
        );

        let body = serde_json::to_value(StatusQuery::new("New", 100, Some("cur"))).unwrap();
        assert_eq!(body["start_cursor"], "cur");
    }

    #[test]
    fn update_body_sets_status_name() {
        let body = serde_json::to_value(StatusUpdate::new("Uploaded")).unwrap();
        assert_eq!(
            body,
            json!({"properties": {"Status": {"status": {"name": "Uploaded"}}}})
        );
    }
}
