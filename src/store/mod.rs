//! Project store persistence.
//!
//! - [`repository`] — the storage boundary: full-store blob load/save behind
//!   a trait so the medium is swappable.
//! - [`export`] — shareable single-project archive.

pub mod export;
pub mod repository;

pub use repository::{JsonFileRepository, MemoryRepository, ProjectRepository};
