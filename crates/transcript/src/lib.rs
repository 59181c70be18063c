//! Transcript store implementations for A.R.I.S.E.

pub mod in_memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryTranscript;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteTranscript;
