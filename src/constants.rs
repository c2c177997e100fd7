// src/constants.rs
//! Domain constants that define the operational boundaries of the sync job.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! tells you how the job talks to Notion and Supabase and what it reports.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// How many pages the Notion API returns per query.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Status workflow
// ---------------------------------------------------------------------------

/// Name of the status property driving the sync workflow.
pub const STATUS_PROPERTY: &str = "Status";

/// Status of a record waiting to be synced.
pub const STATUS_NEW: &str = "New";

/// Status of a record already written to Supabase.
pub const STATUS_UPLOADED: &str = "Uploaded";

// ---------------------------------------------------------------------------
// Source record properties
// ---------------------------------------------------------------------------

pub const TITLE_PROPERTY: &str = "Title";
pub const URL_PROPERTY: &str = "URL";
pub const DATE_PROPERTY: &str = "Date";
pub const AUTHORS_PROPERTY: &str = "Authors";
/// Page-level field copied into `notion_timestamp`.
pub const CREATED_TIME_FIELD: &str = "created_time";

// ---------------------------------------------------------------------------
// Destination tables
// ---------------------------------------------------------------------------

/// Supabase table receiving paper records.
pub const PAPERS_TABLE: &str = "papers";

/// Supabase table receiving link records.
pub const LINKS_TABLE: &str = "links";

/// Rows fetched by a destination liveness probe.
pub const PROBE_SAMPLE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Outer surfaces
// ---------------------------------------------------------------------------

/// External website pinged when `PING_URL` is not configured.
pub const DEFAULT_PING_URL: &str = "https://alpha.gloryolusola.com";

/// Base URL of the Telegram Bot API.
pub const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Default timeout applied to every outbound HTTP client.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default bind address of the HTTP server.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
