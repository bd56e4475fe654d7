//! Replog Record Store
//!
//! This module provides the authoritative holder of exercise records:
//!
//! - **types**: Core data structures (ExerciseRecord, ExerciseKind, RecordTimestamp)
//! - **store**: The `RecordStore` contract with file and memory backends
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//!   append/update/delete → writer lock → load → mutate → temp file → rename
//!
//! Read Path:
//!   read_all → load (missing file = empty sequence)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use replog::storage::{ExerciseRecord, JsonFileStore, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileStore::new("./data/records.json");
//!
//!     store
//!         .append(ExerciseRecord::new("squat").reps(20).datetime("2024-03-15T08:00"))
//!         .await?;
//!
//!     let records = store.read_all().await?;
//!     println!("{} records", records.len());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use types::{ExerciseKind, ExerciseRecord, IndexedRecord, RecordTimestamp, INDEX_FIELD};
