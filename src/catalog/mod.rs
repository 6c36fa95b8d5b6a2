// Catalog data access.
// Memoized fetching per render cycle and the typed accessors built on it.

pub mod access;
pub mod cycle;

pub use access::Catalog;
pub use cycle::Fetched;
