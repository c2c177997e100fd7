// src/api/mod.rs
//! Notion API interaction: querying a database for new records and moving
//! records along the status workflow.
//!
//! The sync loop depends on [`RecordSource`], never on HTTP details.

pub mod client;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::model::SyncPage;
use crate::types::{DatabaseId, PageId};

/// The ability to read and flag records in the source workspace.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches one page of records whose status is `New`.
    async fn query_new(
        &self,
        database: &DatabaseId,
        cursor: Option<&str>,
    ) -> Result<SyncPage, AppError>;

    /// Sets the status property of one record.
    async fn set_status(&self, page: &PageId, status: &str) -> Result<(), AppError>;
}

pub use client::NotionHttpClient;
