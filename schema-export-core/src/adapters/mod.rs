//! Database adapters implementing the catalog seam.
//!
//! # Module Structure
//! - `helpers`: Typed row decoding with consistent error context
//! - `mysql`: MySQL `INFORMATION_SCHEMA` catalog source

pub mod helpers;
pub mod mysql;

pub use mysql::MySqlCatalog;
