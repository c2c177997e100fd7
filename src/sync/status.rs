// src/sync/status.rs
//! Moves synced records to the `Uploaded` status, one record at a time.

use crate::api::RecordSource;
use crate::constants::STATUS_UPLOADED;
use crate::types::PageId;

/// Marks every page `Uploaded`, returning the pages whose update failed.
///
/// A failure is logged and does not stop the remaining updates; a page left
/// `New` is picked up again on the next run.
pub async fn mark_uploaded(source: &dyn RecordSource, pages: &[PageId]) -> Vec<PageId> {
    let mut failed = Vec::new();

    for page in pages {
        if let Err(e) = source.set_status(page, STATUS_UPLOADED).await {
            log::error!("Error updating Notion page {}: {}", page, e);
            failed.push(page.clone());
        }
    }

    if !failed.is_empty() {
        log::warn!(
            "{} of {} status updates failed",
            failed.len(),
            pages.len()
        );
    }

    failed
}
