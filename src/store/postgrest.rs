// src/store/postgrest.rs
//! Supabase REST (PostgREST) client.

use crate::api::client::{extract_response_text, ApiResponse};
use crate::api::parser::preview;
use crate::error::AppError;
use crate::model::DestinationRow;
use crate::types::{SecretKey, TableName, ValidatedUrl};
use reqwest::{header, Client};
use std::time::Duration;

/// Upserts merge on conflict and skip echoing the written rows back.
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

/// A reqwest client bound to one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    rest_url: String,
    on_conflict: Option<String>,
}

impl SupabaseClient {
    /// Creates a client authenticated with the project's API key.
    ///
    /// `on_conflict` names the natural-key column(s) upserts merge on; when
    /// absent PostgREST merges on the table's primary key.
    pub fn new(
        project_url: &ValidatedUrl,
        key: &SecretKey,
        on_conflict: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", project_url.base()),
            on_conflict,
        })
    }

    fn create_headers(key: &SecretKey) -> Result<header::HeaderMap, AppError> {
        let invalid = |e: header::InvalidHeaderValue| {
            AppError::MissingConfiguration(format!("Invalid Supabase key format: {}", e))
        };

        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header::HeaderValue::from_str(key.as_str()).map_err(invalid)?);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", key.as_str())).map_err(invalid)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    fn table_url(&self, table: &TableName) -> String {
        format!("{}/{}", self.rest_url, table.as_str())
    }
}

#[async_trait::async_trait]
impl super::DestinationStore for SupabaseClient {
    async fn upsert(&self, table: &TableName, rows: &[DestinationRow]) -> Result<(), AppError> {
        let mut request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", UPSERT_PREFER)
            .json(rows);
        if let Some(key) = &self.on_conflict {
            request = request.query(&[("on_conflict", key.as_str())]);
        }

        log::debug!("POST {} ({} rows)", self.table_url(table), rows.len());
        let result = extract_response_text(request.send().await?).await?;
        if result.status.is_success() {
            Ok(())
        } else {
            let (status, message) = describe_failure(&result);
            Err(AppError::Write {
                table: table.to_string(),
                status,
                message,
            })
        }
    }

    async fn select_sample(
        &self,
        table: &TableName,
        limit: usize,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let limit = limit.to_string();
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("limit", limit.as_str())]);

        log::debug!("GET {} (limit {})", self.table_url(table), limit);
        let result = extract_response_text(request.send().await?).await?;
        if !result.status.is_success() {
            let (status, message) = describe_failure(&result);
            return Err(AppError::Destination {
                table: table.to_string(),
                status,
                message,
            });
        }

        Ok(serde_json::from_str(&result.data)?)
    }
}

/// Pulls PostgREST's `message` out of an error body, falling back to the raw text.
fn describe_failure(result: &ApiResponse<String>) -> (u16, String) {
    let message = serde_json::from_str::<serde_json::Value>(&result.data)
        .ok()
        .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| preview(&result.data));
    (result.status.as_u16(), message)
}
