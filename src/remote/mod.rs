// Remote catalog module.
// Provides the HTTP client and types for the static category/website documents.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::CatalogClient;
pub use endpoints::{decode_categories, decode_websites};
pub use types::*;
