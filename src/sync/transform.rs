// src/sync/transform.rs
//! Maps a Notion record onto the row shape of its destination table.

use crate::constants::{
    AUTHORS_PROPERTY, CREATED_TIME_FIELD, DATE_PROPERTY, TITLE_PROPERTY, URL_PROPERTY,
};
use crate::error::TransformError;
use crate::model::{DestinationRow, PropertyValue, RichTextItem, SourceRecord};
use crate::types::TableKind;

/// Builds the destination row for `record`.
///
/// Papers rows additionally carry the publication date and authors. Any
/// missing or empty field fails the whole record.
pub fn transform_record(
    record: &SourceRecord,
    kind: TableKind,
) -> Result<DestinationRow, TransformError> {
    let mut row = DestinationRow {
        title: first_segment(record, TITLE_PROPERTY)?,
        url: url_of(record)?,
        notion_timestamp: created_time(record)?,
        date: None,
        authors: None,
    };

    if kind == TableKind::Papers {
        row.date = Some(date_start(record)?);
        row.authors = Some(first_segment(record, AUTHORS_PROPERTY)?);
    }

    Ok(row)
}

/// Plain text of the first segment of a title or rich-text property.
fn first_segment(record: &SourceRecord, field: &str) -> Result<String, TransformError> {
    let segments: Vec<RichTextItem> = match record.property(field)? {
        PropertyValue::Title { title } => title,
        PropertyValue::RichText { rich_text } => rich_text,
        _ => return Err(unexpected(record, field, "title or rich_text")),
    };

    segments
        .into_iter()
        .next()
        .map(|segment| segment.plain_text)
        .ok_or_else(|| missing(record, field))
}

fn created_time(record: &SourceRecord) -> Result<String, TransformError> {
    if record.created_time.is_empty() {
        return Err(missing(record, CREATED_TIME_FIELD));
    }
    Ok(record.created_time.clone())
}

fn url_of(record: &SourceRecord) -> Result<String, TransformError> {
    match record.property(URL_PROPERTY)? {
        PropertyValue::Url { url: Some(url) } => Ok(url),
        PropertyValue::Url { url: None } => Err(missing(record, URL_PROPERTY)),
        _ => Err(unexpected(record, URL_PROPERTY, "url")),
    }
}

fn date_start(record: &SourceRecord) -> Result<String, TransformError> {
    match record.property(DATE_PROPERTY)? {
        PropertyValue::Date { date: Some(date) } => Ok(date.start),
        PropertyValue::Date { date: None } => Err(missing(record, DATE_PROPERTY)),
        _ => Err(unexpected(record, DATE_PROPERTY, "date")),
    }
}

fn missing(record: &SourceRecord, field: &str) -> TransformError {
    TransformError::MissingField {
        record: record.id.to_string(),
        field: field.to_string(),
    }
}

fn unexpected(record: &SourceRecord, field: &str, expected: &'static str) -> TransformError {
    TransformError::UnexpectedShape {
        record: record.id.to_string(),
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paper(properties: serde_json::Value) -> SourceRecord {
        serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "created_time": "2024-01-01T00:00:00Z",
            "properties": properties
        }))
        .unwrap()
    }

    fn full_paper() -> serde_json::Value {
        json!({
            "Title": {"id": "title", "type": "title", "title": [{"plain_text": "A"}, {"plain_text": "ignored"}]},
            "URL": {"id": "u", "type": "url", "url": "http://x"},
            "Date": {"id": "d", "type": "date", "date": {"start": "2024-01-02", "end": null}},
            "Authors": {"id": "a", "type": "rich_text", "rich_text": [{"plain_text": "Jane"}]},
            "Status": {"id": "s", "type": "status", "status": {"name": "New"}}
        })
    }

    #[test]
    fn papers_record_maps_all_columns() {
        let row = transform_record(&paper(full_paper()), TableKind::Papers).unwrap();
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "title": "A",
                "url": "http://x",
                "notion_timestamp": "2024-01-01T00:00:00Z",
                "date": "2024-01-02",
                "authors": "Jane"
            })
        );
    }

    #[test]
    fn links_record_skips_paper_columns() {
        let mut props = full_paper();
        props.as_object_mut().unwrap().remove("Authors");
        props.as_object_mut().unwrap().remove("Date");

        let row = transform_record(&paper(props), TableKind::Links).unwrap();
        assert_eq!(row.date, None);
        assert_eq!(row.authors, None);
        assert_eq!(row.title, "A");
    }

    #[test]
    fn empty_title_is_missing() {
        let mut props = full_paper();
        props["Title"]["title"] = json!([]);
        let err = transform_record(&paper(props), TableKind::Links).unwrap_err();
        assert_eq!(
            err,
            TransformError::MissingField {
                record: "550e8400e29b41d4a716446655440000".into(),
                field: "Title".into()
            }
        );
    }

    #[test]
    fn papers_without_authors_fail() {
        let mut props = full_paper();
        props.as_object_mut().unwrap().remove("Authors");
        assert!(matches!(
            transform_record(&paper(props), TableKind::Papers),
            Err(TransformError::MissingField { field, .. }) if field == "Authors"
        ));
    }

    #[test]
    fn null_url_and_date_fail() {
        let mut props = full_paper();
        props["URL"]["url"] = json!(null);
        assert!(transform_record(&paper(props), TableKind::Links).is_err());

        let mut props = full_paper();
        props["Date"]["date"] = json!(null);
        assert!(transform_record(&paper(props), TableKind::Papers).is_err());
    }

    #[test]
    fn missing_created_time_fails() {
        let record: SourceRecord = serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "properties": full_paper()
        }))
        .unwrap();
        assert_eq!(
            transform_record(&record, TableKind::Links).unwrap_err(),
            TransformError::MissingField {
                record: "550e8400e29b41d4a716446655440000".into(),
                field: "created_time".into()
            }
        );
    }

    #[test]
    fn wrong_property_type_is_unexpected_shape() {
        let mut props = full_paper();
        props["URL"] = json!({"id": "u", "type": "rich_text", "rich_text": [{"plain_text": "x"}]});
        assert!(matches!(
            transform_record(&paper(props), TableKind::Links),
            Err(TransformError::UnexpectedShape { expected: "url", .. })
        ));
    }
}
