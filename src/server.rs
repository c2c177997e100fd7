// src/server.rs
//! HTTP surface of the job, meant to be hit by a cron trigger.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Plain-text liveness |
//! | `GET` | `/api/ping` | Ping the external website |
//! | `GET` | `/api/sync` | Probes plus Notion → Supabase sync |
//! | `GET` | `/api/notify` | Same as `/api/sync`, then a Telegram summary |
//!
//! Every endpoint answers 200; failures are reported in the body.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::job::SyncJob;
use crate::probe::EndpointProbe;
use crate::report::SyncReport;

/// Application state shared across all handlers.
pub type AppState = Arc<SyncJob>;

/// Creates the router serving the job.
pub fn sync_router(job: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/ping", get(ping))
        .route("/api/sync", get(sync))
        .route("/api/notify", get(notify))
        .with_state(job)
}

/// `GET /`
async fn index() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "Status, OK")
}

/// `GET /api/ping`
async fn ping(State(job): State<AppState>) -> Json<EndpointProbe> {
    Json(job.ping_website().await)
}

/// `GET /api/sync`
async fn sync(State(job): State<AppState>) -> Json<SyncReport> {
    Json(job.run().await)
}

/// `GET /api/notify`
async fn notify(State(job): State<AppState>) -> Json<SyncReport> {
    Json(job.run_and_notify().await)
}
