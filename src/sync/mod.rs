//! Notion → Supabase synchronization.

mod engine;
mod status;
mod transform;

pub use engine::{SyncEngine, SyncTarget, TableSyncOutcome};
pub use status::mark_uploaded;
pub use transform::transform_record;
