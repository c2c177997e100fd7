// src/probe.rs
//! Liveness probes: a bounded read of a Supabase table and a GET of an
//! external website. Both are best-effort and report instead of failing.

use crate::constants::PROBE_SAMPLE_LIMIT;
use crate::error::AppError;
use crate::store::DestinationStore;
use crate::types::{TableName, ValidatedUrl};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Outcome label shared by every section of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Error,
}

impl ProbeStatus {
    pub fn from_success(ok: bool) -> Self {
        if ok {
            ProbeStatus::Success
        } else {
            ProbeStatus::Error
        }
    }
}

/// Result of sampling a destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableProbe {
    pub status: ProbeStatus,
    pub records_fetched: Option<usize>,
}

/// Result of pinging an external endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EndpointProbe {
    Success { code: u16 },
    Error { message: String },
}

impl EndpointProbe {
    pub fn is_success(&self) -> bool {
        matches!(self, EndpointProbe::Success { .. })
    }
}

/// The ability to issue a GET and report the HTTP status code.
#[async_trait::async_trait]
pub trait EndpointPinger: Send + Sync {
    async fn ping(&self, url: &ValidatedUrl) -> Result<u16, AppError>;
}

/// Pings endpoints with a plain reqwest client.
#[derive(Clone)]
pub struct HttpPinger {
    client: Client,
}

impl HttpPinger {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait::async_trait]
impl EndpointPinger for HttpPinger {
    async fn ping(&self, url: &ValidatedUrl) -> Result<u16, AppError> {
        let response = self.client.get(url.as_str()).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Fetches up to ten rows of `table` to confirm the store is reachable.
pub async fn probe_table(store: &dyn DestinationStore, table: &TableName) -> TableProbe {
    match store.select_sample(table, PROBE_SAMPLE_LIMIT).await {
        Ok(rows) => TableProbe {
            status: ProbeStatus::Success,
            records_fetched: Some(rows.len()),
        },
        Err(e) => {
            log::error!("Error pinging Supabase table {}: {}", table, e);
            TableProbe {
                status: ProbeStatus::Error,
                records_fetched: None,
            }
        }
    }
}

/// GETs `url`; only a 2xx answer counts as alive.
pub async fn probe_endpoint(pinger: &dyn EndpointPinger, url: &ValidatedUrl) -> EndpointProbe {
    match pinger.ping(url).await {
        Ok(code) if (200..300).contains(&code) => EndpointProbe::Success { code },
        Ok(code) => {
            log::error!("Error pinging website {}: HTTP {}", url, code);
            EndpointProbe::Error {
                message: format!("Failed to ping website: HTTP {}", code),
            }
        }
        Err(e) => {
            log::error!("Error pinging website {}: {}", url, e);
            EndpointProbe::Error {
                message: "Failed to ping website".to_string(),
            }
        }
    }
}
