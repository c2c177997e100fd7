//! Source records read from Notion and the rows written to Supabase.

mod property_value;
mod record;
mod row;

pub use property_value::{DateValue, PropertyValue, RichTextItem, SelectOption};
pub use record::{RecordStatus, SourceRecord, SyncPage};
pub use row::DestinationRow;
