//! Proverb collection operations.
//! - `collection`: pure helpers over an in-memory collection (filters, ids, random pick).
//! - `service`: `ProverbService`, the store used by HTTP handlers.

pub mod collection;
pub mod service;

pub use service::ProverbService;
