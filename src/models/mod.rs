//! Domain model types.
//!
//! - [`Project`] — the unit of checkout: selected services plus attachments.
//! - [`ServiceSelection`] — a catalog snapshot added to a project.
//! - [`FileAttachment`] — metadata + durable reference for one upload.

mod file;
mod project;
mod service;

pub use file::FileAttachment;
pub use project::{Project, ServiceFileGroup};
pub use service::ServiceSelection;
