// src/sync/engine.rs
//! The paginated fetch → transform → upsert → mark loop.

use super::status::mark_uploaded;
use super::transform::transform_record;
use crate::api::RecordSource;
use crate::model::{RecordStatus, SourceRecord};
use crate::store::DestinationStore;
use crate::types::{DatabaseId, PageId, TableName};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// A Notion database and the Supabase table it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub database: DatabaseId,
    pub table: TableName,
}

/// What one sync of one table did.
///
/// `error` is set when a page query aborted the table. Rejected or malformed
/// pages are counted in `failed_pages` and left `New` for the next run; the
/// table still counts as failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSyncOutcome {
    pub processed: usize,
    pub pages_queried: usize,
    pub batches_written: usize,
    pub failed_pages: usize,
    pub failed_status_updates: usize,
    pub skipped_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableSyncOutcome {
    /// True when nothing was left behind: no aborted query, no skipped
    /// page and no record left unmarked.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failed_pages == 0 && self.failed_status_updates == 0
    }

    /// Short description of what went wrong, if anything did.
    pub fn failure_summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(e) = &self.error {
            parts.push(e.clone());
        }
        if self.failed_pages > 0 {
            parts.push(format!("{} failed pages", self.failed_pages));
        }
        if self.failed_status_updates > 0 {
            parts.push(format!(
                "{} failed status updates",
                self.failed_status_updates
            ));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

/// Drives the sync of Notion databases into Supabase tables.
pub struct SyncEngine {
    source: Arc<dyn RecordSource>,
    store: Arc<dyn DestinationStore>,
}

impl SyncEngine {
    pub fn new(source: Arc<dyn RecordSource>, store: Arc<dyn DestinationStore>) -> Self {
        Self { source, store }
    }

    /// Syncs every target in order, one after the other.
    pub async fn run(&self, targets: &[SyncTarget]) -> Vec<(TableName, TableSyncOutcome)> {
        let mut outcomes = Vec::with_capacity(targets.len());
        for target in targets {
            log::info!("Syncing {} database", target.table);
            let outcome = self.sync_table(target).await;
            outcomes.push((target.table.clone(), outcome));
        }
        outcomes
    }

    /// Pages through all `New` records of the target database.
    ///
    /// A failed query ends the table's sync. A failed transform or upsert
    /// skips only that page: its records stay `New` and the cursor advances.
    pub async fn sync_table(&self, target: &SyncTarget) -> TableSyncOutcome {
        let mut outcome = TableSyncOutcome::default();
        let mut synced: HashSet<PageId> = HashSet::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = match self
                .source
                .query_new(&target.database, cursor.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    log::error!("Error querying Notion database {}: {}", target.database, e);
                    outcome.error = Some(e.to_string());
                    break;
                }
            };
            outcome.pages_queried += 1;

            if page.results.is_empty() {
                log::info!("No new items found in the {} database.", target.table);
                break;
            }

            self.sync_page(target, &page.results, &mut synced, &mut outcome)
                .await;

            match page.continuation() {
                Some(next) if cursor.as_deref() == Some(next) => {
                    log::error!(
                        "Notion returned the same cursor twice for {}; stopping",
                        target.database
                    );
                    outcome.error = Some(format!("pagination stalled at cursor {}", next));
                    break;
                }
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
        }

        log::info!(
            "Total items processed for {}: {}",
            target.table,
            outcome.processed
        );
        outcome
    }

    async fn sync_page(
        &self,
        target: &SyncTarget,
        records: &[SourceRecord],
        synced: &mut HashSet<PageId>,
        outcome: &mut TableSyncOutcome,
    ) {
        let kind = target.table.kind();
        let mut batch = Vec::with_capacity(records.len());
        let mut pages: Vec<PageId> = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            log::debug!(
                "Processing {} {}/{}: {}",
                target.table,
                index + 1,
                records.len(),
                record.id
            );

            if record.status() != RecordStatus::New
                || synced.contains(&record.id)
                || pages.contains(&record.id)
            {
                log::warn!("Skipping record {} (not New or already synced)", record.id);
                outcome.skipped_records += 1;
                continue;
            }

            match transform_record(record, kind) {
                Ok(row) => {
                    batch.push(row);
                    pages.push(record.id.clone());
                }
                Err(e) => {
                    log::error!("Skipping page of {} records: {}", records.len(), e);
                    outcome.failed_pages += 1;
                    return;
                }
            }
        }

        if batch.is_empty() {
            return;
        }

        if let Err(e) = self.store.upsert(&target.table, &batch).await {
            log::error!("Error inserting data into Supabase {}: {}", target.table, e);
            outcome.failed_pages += 1;
            return;
        }
        outcome.batches_written += 1;
        log::info!(
            "Inserted {} items into Supabase {} table.",
            batch.len(),
            target.table
        );

        let failed = mark_uploaded(self.source.as_ref(), &pages).await;
        outcome.failed_status_updates += failed.len();
        outcome.processed += pages.len();
        synced.extend(pages);
    }
}
