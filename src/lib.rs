// src/lib.rs
//! notion-supabase-sync library: moves new Notion database rows into Supabase.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `TransformError`, `ValidationError`
//! - **Configuration**: `SyncConfig`, `CommandLineInput`
//! - **Domain model**: `SourceRecord`, `SyncPage`, `DestinationRow`
//! - **Clients**: `RecordSource` / `NotionHttpClient`, `DestinationStore` / `SupabaseClient`
//! - **Sync**: `SyncEngine`, `transform_record`, `mark_uploaded`
//! - **Job surface**: `SyncJob`, probes, `SyncReport`, `sync_router`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod job;
pub mod model;
pub mod notify;
pub mod probe;
pub mod report;
pub mod server;
pub mod store;
pub mod sync;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, TransformError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, SyncConfig, TelegramConfig};

// --- Domain Model ---
pub use crate::model::{
    DateValue, DestinationRow, PropertyValue, RecordStatus, RichTextItem, SelectOption,
    SourceRecord, SyncPage,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, DatabaseId, PageId, SecretKey, TableKind, TableName, ValidatedUrl,
};

// --- Clients ---
pub use crate::api::{NotionHttpClient, RecordSource};
pub use crate::notify::{Notifier, TelegramNotifier};
pub use crate::probe::{EndpointPinger, HttpPinger};
pub use crate::store::{DestinationStore, SupabaseClient};

// --- Sync ---
pub use crate::sync::{mark_uploaded, transform_record, SyncEngine, SyncTarget, TableSyncOutcome};

// --- Job Surface ---
pub use crate::job::SyncJob;
pub use crate::probe::{probe_endpoint, probe_table, EndpointProbe, ProbeStatus, TableProbe};
pub use crate::report::{NotificationResult, NotificationStatus, SyncReport, SyncSummary};
pub use crate::server::sync_router;
