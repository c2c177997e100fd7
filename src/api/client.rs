// src/api/client.rs
//! Thin reqwest wrapper for the Notion API.
//!
//! Handles authentication and raw request/response plumbing; decoding lives
//! in `parser`.

use super::parser;
use super::responses::{StatusQuery, StatusUpdate};
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION, STATUS_NEW};
use crate::error::AppError;
use crate::model::SyncPage;
use crate::types::{ApiKey, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, timeout: Duration) -> Result<Self, AppError> {
        Self::with_base_url(api_key, timeout, NOTION_API_BASE_URL)
    }

    /// Creates a client against a different API root (proxies, test servers).
    pub fn with_base_url(
        api_key: &ApiKey,
        timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Makes a PATCH request with JSON body to the specified endpoint.
    pub async fn patch<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("PATCH {}", url);
        Ok(self.client.patch(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::RecordSource for NotionHttpClient {
    async fn query_new(
        &self,
        database: &DatabaseId,
        cursor: Option<&str>,
    ) -> Result<SyncPage, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let query = StatusQuery::new(STATUS_NEW, NOTION_API_PAGE_SIZE, cursor);
        let response = self.post(&endpoint, &query).await?;
        let result = extract_response_text(response).await?;
        let page = parser::parse_sync_page(result)?;
        log::debug!(
            "Query {} returned {} records (has_more: {})",
            database,
            page.results.len(),
            page.has_more
        );
        Ok(page)
    }

    async fn set_status(&self, page: &PageId, status: &str) -> Result<(), AppError> {
        let endpoint = format!("pages/{}", page.to_hyphenated());
        let response = self.patch(&endpoint, &StatusUpdate::new(status)).await?;
        let result = extract_response_text(response).await?;
        parser::expect_success(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
