//! Teacher registry: a JSON API and server-rendered pages over SQLite.
//!
//! - [`db`]: domain model, repository traits and the SQLite implementation
//! - [`api`]: axum router, handlers, pages and server startup
//! - [`paths`]: default on-disk locations

pub mod api;
pub mod db;
pub mod paths;
mod serde_utils;
