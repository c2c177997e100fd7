// src/report.rs
//! The JSON report returned by the sync endpoint.
//!
//! Every section carries its own `status`; the HTTP status code never does.

use crate::probe::{EndpointProbe, ProbeStatus, TableProbe};
use crate::sync::TableSyncOutcome;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Full result of one invocation of the job.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub generated_at: DateTime<Utc>,
    pub website_ping: EndpointProbe,
    /// Keyed `<table>_table`, in configuration order.
    pub supabase_ping: IndexMap<String, TableProbe>,
    pub notion_supabase_sync: SyncSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationResult>,
}

/// Aggregate of the per-table sync outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub status: ProbeStatus,
    pub total_processed: usize,
    pub tables: IndexMap<String, TableReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub status: ProbeStatus,
    #[serde(flatten)]
    pub outcome: TableSyncOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Success,
    Error,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResult {
    pub status: NotificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SyncSummary {
    /// Folds table outcomes into a summary; any failed table fails the sync.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, TableSyncOutcome)>,
    {
        let tables: IndexMap<String, TableReport> = outcomes
            .into_iter()
            .map(|(table, outcome)| {
                let report = TableReport {
                    status: ProbeStatus::from_success(outcome.is_success()),
                    outcome,
                };
                (table, report)
            })
            .collect();

        let ok = tables.values().all(|t| t.status == ProbeStatus::Success);
        SyncSummary {
            status: ProbeStatus::from_success(ok),
            total_processed: tables.values().map(|t| t.outcome.processed).sum(),
            tables,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProbeStatus::Success
    }

    /// One-line message for the notification channel.
    pub fn notification_text(&self) -> String {
        if self.is_success() {
            format!(
                "✅ Notion → Supabase sync succeeded: {} records processed",
                self.total_processed
            )
        } else {
            let failed: Vec<String> = self
                .tables
                .iter()
                .filter(|(_, t)| t.status == ProbeStatus::Error)
                .map(|(name, t)| match t.outcome.failure_summary() {
                    Some(reason) => format!("{} ({})", name, reason),
                    None => name.clone(),
                })
                .collect();
            format!("❌ Notion → Supabase sync failed: {}", failed.join(", "))
        }
    }
}

/// Report key for a table's liveness probe.
pub fn probe_key(table: &str) -> String {
    format!("{}_table", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn outcome(processed: usize, error: Option<&str>) -> TableSyncOutcome {
        TableSyncOutcome {
            processed,
            pages_queried: 1,
            batches_written: usize::from(processed > 0),
            error: error.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn summary_adds_up_tables() {
        let summary = SyncSummary::from_outcomes(vec![
            ("papers".to_string(), outcome(5, None)),
            ("links".to_string(), outcome(3, None)),
        ]);
        assert!(summary.is_success());
        assert_eq!(summary.total_processed, 8);
        assert_eq!(
            summary.notification_text(),
            "✅ Notion → Supabase sync succeeded: 8 records processed"
        );
    }

    #[test]
    fn one_aborted_table_fails_the_sync() {
        let summary = SyncSummary::from_outcomes(vec![
            ("papers".to_string(), outcome(0, Some("Network failure: timeout"))),
            ("links".to_string(), outcome(2, None)),
        ]);
        assert_eq!(summary.status, ProbeStatus::Error);
        assert_eq!(
            summary.notification_text(),
            "❌ Notion → Supabase sync failed: papers (Network failure: timeout)"
        );
    }

    #[test]
    fn rejected_pages_fail_the_table() {
        let summary = SyncSummary::from_outcomes(vec![
            (
                "papers".to_string(),
                TableSyncOutcome {
                    pages_queried: 3,
                    batches_written: 1,
                    processed: 2,
                    failed_pages: 2,
                    failed_status_updates: 1,
                    ..Default::default()
                },
            ),
            ("links".to_string(), outcome(1, None)),
        ]);
        assert_eq!(summary.status, ProbeStatus::Error);
        assert_eq!(summary.tables["papers"].status, ProbeStatus::Error);
        assert_eq!(summary.tables["links"].status, ProbeStatus::Success);
        assert_eq!(summary.total_processed, 3);
        assert_eq!(
            summary.notification_text(),
            "❌ Notion → Supabase sync failed: papers (2 failed pages; 1 failed status updates)"
        );
    }

    #[test]
    fn table_report_flattens_outcome() {
        let summary = SyncSummary::from_outcomes(vec![("links".to_string(), outcome(2, None))]);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "status": "success",
                "total_processed": 2,
                "tables": {
                    "links": {
                        "status": "success",
                        "processed": 2,
                        "pages_queried": 1,
                        "batches_written": 1,
                        "failed_pages": 0,
                        "failed_status_updates": 0,
                        "skipped_records": 0
                    }
                }
            })
        );
    }

    #[test]
    fn probe_keys() {
        assert_eq!(probe_key("papers"), "papers_table");
    }
}
