pub mod journal;

pub use journal::{Journal, JournalError, DEFAULT_JOURNAL_PATH};
