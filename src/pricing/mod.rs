//! Price calculation.
//!
//! Two independent calculators live here:
//! - [`quote`] — totals for a project's selected services (client wizard).
//! - [`invoice`] — totals for admin invoice line items.
//!
//! They operate on different entities and are deliberately not unified.

pub mod invoice;
pub mod quote;
