// tests/common/mod.rs
//! In-memory stand-ins for Notion, Supabase, the pinged website and Telegram.
#![allow(dead_code)]

use notion_supabase_sync::{
    AppError, DatabaseId, DestinationRow, DestinationStore, EndpointPinger, Notifier, PageId,
    RecordSource, SourceRecord, SyncPage, SyncTarget, TableName, ValidatedUrl,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

pub fn page_id(n: usize) -> PageId {
    PageId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn database_id(n: usize) -> DatabaseId {
    DatabaseId::parse(&format!("{:032x}", 0xdb00 + n)).unwrap()
}

pub fn target(table: &str, database: usize) -> SyncTarget {
    SyncTarget {
        database: database_id(database),
        table: TableName::new(table).unwrap(),
    }
}

/// A Notion page as returned by a database query.
pub fn page_json(n: usize, status: &str) -> Value {
    json!({
        "object": "page",
        "id": page_id(n).to_hyphenated(),
        "created_time": format!("2024-01-{:02}T00:00:00.000Z", n % 28 + 1),
        "archived": false,
        "properties": {
            "Title": {"id": "title", "type": "title", "title": [{"type": "text", "plain_text": format!("Paper {}", n)}]},
            "URL": {"id": "u", "type": "url", "url": format!("https://example.com/{}", n)},
            "Date": {"id": "d", "type": "date", "date": {"start": "2024-02-01", "end": null}},
            "Authors": {"id": "a", "type": "rich_text", "rich_text": [{"type": "text", "plain_text": "Jane Doe"}]},
            "Status": {"id": "s", "type": "status", "status": {"id": "1", "name": status, "color": "blue"}}
        }
    })
}

#[derive(Default)]
struct SourceState {
    pages: Vec<Value>,
    snapshot: Vec<usize>,
    queries: usize,
    status_updates: Vec<PageId>,
}

/// Fake Notion database with offset cursors over a snapshot taken by the
/// first query of each run.
pub struct FakeSource {
    state: Mutex<SourceState>,
    page_size: usize,
    apply_filter: bool,
    fail_query_on_call: Option<usize>,
    fail_status_for: HashSet<PageId>,
}

impl FakeSource {
    pub fn new(pages: Vec<Value>, page_size: usize) -> Self {
        Self {
            state: Mutex::new(SourceState {
                pages,
                ..Default::default()
            }),
            page_size,
            apply_filter: true,
            fail_query_on_call: None,
            fail_status_for: HashSet::new(),
        }
    }

    /// Returns every page regardless of status, as a misbehaving filter would.
    pub fn ignoring_filter(mut self) -> Self {
        self.apply_filter = false;
        self
    }

    /// Fails the n-th query (1-based).
    pub fn failing_query(mut self, call: usize) -> Self {
        self.fail_query_on_call = Some(call);
        self
    }

    pub fn failing_status_update(mut self, page: PageId) -> Self {
        self.fail_status_for.insert(page);
        self
    }

    pub fn queries(&self) -> usize {
        self.state.lock().unwrap().queries
    }

    pub fn status_updates(&self) -> Vec<PageId> {
        self.state.lock().unwrap().status_updates.clone()
    }

    pub fn status_of(&self, n: usize) -> String {
        let id = page_id(n).to_hyphenated();
        let state = self.state.lock().unwrap();
        let page = state
            .pages
            .iter()
            .find(|p| p["id"] == id.as_str())
            .expect("unknown page");
        page["properties"]["Status"]["status"]["name"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

#[async_trait::async_trait]
impl RecordSource for FakeSource {
    async fn query_new(
        &self,
        _database: &DatabaseId,
        cursor: Option<&str>,
    ) -> Result<SyncPage, AppError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.queries += 1;

        if self.fail_query_on_call == Some(state.queries) {
            return Err(AppError::Query {
                code: notion_supabase_sync::NotionErrorCode::ValidationFailed,
                message: "start_cursor is invalid".into(),
            });
        }

        if cursor.is_none() {
            let apply_filter = self.apply_filter;
            state.snapshot = state
                .pages
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    !apply_filter || p["properties"]["Status"]["status"]["name"] == "New"
                })
                .map(|(i, _)| i)
                .collect();
        }

        let offset: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (offset + self.page_size).min(state.snapshot.len());
        let results = state.snapshot[offset.min(end)..end]
            .iter()
            .map(|&i| serde_json::from_value::<SourceRecord>(state.pages[i].clone()).unwrap())
            .collect();
        let has_more = end < state.snapshot.len();

        Ok(SyncPage {
            results,
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }

    async fn set_status(&self, page: &PageId, status: &str) -> Result<(), AppError> {
        if self.fail_status_for.contains(page) {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset",
            )));
        }

        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        let id = page.to_hyphenated();
        let target = state
            .pages
            .iter_mut()
            .find(|p| p["id"] == id.as_str())
            .expect("status update for unknown page");
        target["properties"]["Status"]["status"]["name"] = json!(status);
        state.status_updates.push(page.clone());
        Ok(())
    }
}

#[derive(Default)]
struct StoreState {
    tables: HashMap<String, Vec<DestinationRow>>,
    upserts: usize,
    batches: Vec<Vec<DestinationRow>>,
}

/// Fake Supabase keyed on `url`.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<StoreState>,
    fail_upsert_calls: HashSet<usize>,
    fail_select: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the n-th upsert (1-based).
    pub fn failing_upsert(mut self, call: usize) -> Self {
        self.fail_upsert_calls.insert(call);
        self
    }

    pub fn failing_select(mut self) -> Self {
        self.fail_select = true;
        self
    }

    pub fn with_rows(self, table: &str, count: usize) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let rows = state.tables.entry(table.to_string()).or_default();
            for n in 0..count {
                rows.push(DestinationRow {
                    title: format!("seed {}", n),
                    url: format!("https://seed.example/{}", n),
                    notion_timestamp: "2023-12-31T00:00:00.000Z".into(),
                    date: None,
                    authors: None,
                });
            }
        }
        self
    }

    pub fn upserts(&self) -> usize {
        self.state.lock().unwrap().upserts
    }

    pub fn batches(&self) -> Vec<Vec<DestinationRow>> {
        self.state.lock().unwrap().batches.clone()
    }

    pub fn rows(&self, table: &str) -> Vec<DestinationRow> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl DestinationStore for FakeStore {
    async fn upsert(&self, table: &TableName, rows: &[DestinationRow]) -> Result<(), AppError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.upserts += 1;

        if self.fail_upsert_calls.contains(&state.upserts) {
            return Err(AppError::Write {
                table: table.to_string(),
                status: 409,
                message: "duplicate key value violates unique constraint".into(),
            });
        }

        state.batches.push(rows.to_vec());
        let existing = state.tables.entry(table.to_string()).or_default();
        for row in rows {
            match existing.iter_mut().find(|r| r.url == row.url) {
                Some(slot) => *slot = row.clone(),
                None => existing.push(row.clone()),
            }
        }
        Ok(())
    }

    async fn select_sample(
        &self,
        table: &TableName,
        limit: usize,
    ) -> Result<Vec<Value>, AppError> {
        if self.fail_select {
            return Err(AppError::Destination {
                table: table.to_string(),
                status: 401,
                message: "Invalid API key".into(),
            });
        }

        Ok(self
            .rows(table.as_str())
            .into_iter()
            .take(limit)
            .map(|row| serde_json::to_value(row).unwrap())
            .collect())
    }
}

/// Fake website answering with a fixed status, or unreachable.
pub struct FakePinger {
    answer: Option<u16>,
}

impl FakePinger {
    pub fn answering(code: u16) -> Self {
        Self { answer: Some(code) }
    }

    pub fn unreachable() -> Self {
        Self { answer: None }
    }
}

#[async_trait::async_trait]
impl EndpointPinger for FakePinger {
    async fn ping(&self, _url: &ValidatedUrl) -> Result<u16, AppError> {
        self.answer.ok_or_else(|| {
            AppError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
        })
    }
}

/// Fake notification channel recording every message.
#[derive(Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, text: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Notification("Telegram answered HTTP 403".into()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn ping_url() -> ValidatedUrl {
    ValidatedUrl::parse("https://alpha.example.com").unwrap()
}
