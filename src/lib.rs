//! Product Store Data-Access Library
//!
//! Generic repository contract plus a Postgres-backed implementation for the
//! products table, with paginated, filtered search.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::traits::repository::{Repository, SearchInput, SearchOutput, SortDirection};
pub use modules::products;
