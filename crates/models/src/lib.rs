//! Domain entities shared by the service and server crates.
//! - `proverb`: the stored record, its input shape and the list query.
//! - `errors`: validation failures raised before anything touches storage.

pub mod errors;
pub mod proverb;

pub use proverb::{Proverb, ProverbInput, ProverbQuery};
