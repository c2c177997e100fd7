// src/api/parser.rs
//! Decoding of Notion API responses into sync types or typed errors.

use super::client::ApiResponse;
use super::responses::NotionError;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::SyncPage;

/// Parse any Notion API response, mapping error bodies to `AppError`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result))
    }
}

/// Checks a response whose body is not needed.
pub fn expect_success(result: ApiResponse<String>) -> Result<(), AppError> {
    if result.status.is_success() {
        Ok(())
    } else {
        Err(parse_error(&result))
    }
}

/// Parse a database query response.
pub fn parse_sync_page(result: ApiResponse<String>) -> Result<SyncPage, AppError> {
    parse_api_response(result)
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error(result: &ApiResponse<String>) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(&result.data) {
        return AppError::from_notion_error(
            &notion_error.code,
            notion_error.message,
            notion_error.request_id,
        );
    }

    let code = NotionErrorCode::from_http_status(result.status.as_u16());
    let message = format!("HTTP {} from {}: {}", result.status, result.url, preview(&result.data));
    if code.is_query_rejection() {
        AppError::Query { code, message }
    } else {
        AppError::NotionService {
            code,
            message,
            request_id: None,
        }
    }
}

/// Truncates a response body for log and error messages.
pub(crate) fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
