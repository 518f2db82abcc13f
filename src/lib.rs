// Roster - In-memory student and teacher records with search, filters and paging

pub mod config;
pub mod console;
pub mod filter;
pub mod jsonl;
pub mod notify;
pub mod panel;
pub mod record;
pub mod seed;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use filter::{PAGE_SIZE, Page, StatusFilter, ViewFilter, paginate};
pub use notify::{LogNotifier, MemoryNotifier, Notification, Notifier};
pub use panel::{Admin, Panel};
pub use record::{Record, RecordKind, RecordPatch, Student, Teacher};
pub use seed::{HttpSeedSource, JsonlSeedSource, SeedSource, SeedUser, StaticSeedSource};
pub use session::{Draft, DraftField, EditSession, FieldValue, SubmitAction, Submitted};
pub use store::{IdStrategy, Store};
