// src/store/mod.rs
//! Supabase interaction: batch upserts and bounded reads of destination tables.

mod postgrest;

use crate::error::AppError;
use crate::model::DestinationRow;
use crate::types::TableName;

/// The ability to write synced rows and sample a destination table.
#[async_trait::async_trait]
pub trait DestinationStore: Send + Sync {
    /// Inserts the rows, overwriting existing rows with the same key.
    async fn upsert(&self, table: &TableName, rows: &[DestinationRow]) -> Result<(), AppError>;

    /// Fetches at most `limit` rows of the table.
    async fn select_sample(
        &self,
        table: &TableName,
        limit: usize,
    ) -> Result<Vec<serde_json::Value>, AppError>;
}

pub use postgrest::SupabaseClient;
