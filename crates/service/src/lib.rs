//! Service layer for the proverb collection.
//! - `storage`: the `{load, save}` capability and its file/memory backends.
//! - `proverb`: pure collection helpers plus the store service that runs
//!   each operation as one load-transform-save pass.
//! - Errors are `ServiceError`, mapped to HTTP statuses by the server crate.

pub mod errors;
pub mod proverb;
pub mod runtime;
pub mod storage;
