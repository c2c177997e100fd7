// src/job.rs
//! One invocation of the sync job: probes, table syncs, optional notification.

use crate::api::{NotionHttpClient, RecordSource};
use crate::config::SyncConfig;
use crate::error::AppError;
use crate::notify::{Notifier, TelegramNotifier};
use crate::probe::{probe_endpoint, probe_table, EndpointPinger, EndpointProbe, HttpPinger};
use crate::report::{probe_key, NotificationResult, NotificationStatus, SyncReport, SyncSummary};
use crate::store::{DestinationStore, SupabaseClient};
use crate::sync::{SyncEngine, SyncTarget};
use crate::types::ValidatedUrl;
use indexmap::IndexMap;
use std::sync::Arc;

/// Everything a run needs, injected so tests can swap in fakes.
pub struct SyncJob {
    engine: SyncEngine,
    store: Arc<dyn DestinationStore>,
    pinger: Arc<dyn EndpointPinger>,
    notifier: Option<Arc<dyn Notifier>>,
    targets: Vec<SyncTarget>,
    ping_url: ValidatedUrl,
}

impl SyncJob {
    pub fn new(
        source: Arc<dyn RecordSource>,
        store: Arc<dyn DestinationStore>,
        pinger: Arc<dyn EndpointPinger>,
        targets: Vec<SyncTarget>,
        ping_url: ValidatedUrl,
    ) -> Self {
        Self {
            engine: SyncEngine::new(source, Arc::clone(&store)),
            store,
            pinger,
            notifier: None,
            targets,
            ping_url,
        }
    }

    /// Wires the real Notion, Supabase, website and Telegram clients.
    pub fn from_config(config: &SyncConfig) -> Result<Self, AppError> {
        let source = NotionHttpClient::new(&config.notion_token, config.http_timeout)?;
        let store = SupabaseClient::new(
            &config.supabase_url,
            &config.supabase_key,
            config.upsert_key.clone(),
            config.http_timeout,
        )?;
        let pinger = HttpPinger::new(config.http_timeout)?;

        let job = Self::new(
            Arc::new(source),
            Arc::new(store),
            Arc::new(pinger),
            config.targets()?,
            config.ping_url.clone(),
        );

        Ok(match &config.telegram {
            Some(telegram) => job.with_notifier(Arc::new(TelegramNotifier::new(
                &telegram.bot_token,
                telegram.chat_id.clone(),
                config.http_timeout,
            )?)),
            None => job,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Pings the external website only.
    pub async fn ping_website(&self) -> EndpointProbe {
        probe_endpoint(self.pinger.as_ref(), &self.ping_url).await
    }

    /// Runs the probes and then every table sync, in order.
    pub async fn run(&self) -> SyncReport {
        log::info!("Starting Notion to Supabase sync process");

        let website_ping = self.ping_website().await;

        let mut supabase_ping = IndexMap::new();
        for target in &self.targets {
            let probe = probe_table(self.store.as_ref(), &target.table).await;
            supabase_ping.insert(probe_key(target.table.as_str()), probe);
        }

        let outcomes = self.engine.run(&self.targets).await;
        let summary = SyncSummary::from_outcomes(
            outcomes
                .into_iter()
                .map(|(table, outcome)| (table.to_string(), outcome)),
        );

        log::info!(
            "Sync process completed: {} records processed ({:?})",
            summary.total_processed,
            summary.status
        );

        SyncReport {
            generated_at: chrono::Utc::now(),
            website_ping,
            supabase_ping,
            notion_supabase_sync: summary,
            notification: None,
        }
    }

    /// Runs the job and reports the outcome to the notification channel.
    ///
    /// Delivery failures are logged and recorded in the report, never raised.
    pub async fn run_and_notify(&self) -> SyncReport {
        let mut report = self.run().await;
        report.notification = Some(self.notify(&report.notion_supabase_sync).await);
        report
    }

    async fn notify(&self, summary: &SyncSummary) -> NotificationResult {
        let Some(notifier) = &self.notifier else {
            log::warn!("Notification requested but no notifier is configured");
            return NotificationResult {
                status: NotificationStatus::Disabled,
                message: None,
            };
        };

        match notifier.send(&summary.notification_text()).await {
            Ok(()) => NotificationResult {
                status: NotificationStatus::Success,
                message: None,
            },
            Err(e) => {
                log::error!("Error sending notification: {}", e);
                NotificationResult {
                    status: NotificationStatus::Error,
                    message: Some(e.to_string()),
                }
            }
        }
    }
}
