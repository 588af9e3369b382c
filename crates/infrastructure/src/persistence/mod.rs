//! Persistence adapters

mod in_memory_history;

pub use in_memory_history::{DEFAULT_MAX_ENTRIES, InMemoryHistoryStore};
