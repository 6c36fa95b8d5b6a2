// Cache module for local filesystem caching.
// Stores remote responses so they can be reused inside the revalidation window.

pub mod paths;
pub mod store;

pub use store::{REVALIDATE_AFTER, ResponseStore, write_atomic};
