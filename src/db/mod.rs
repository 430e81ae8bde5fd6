//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access so the
//! HTTP layer never depends on a concrete storage backend.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Teacher) and validation
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx/SQLite implementation

mod error;
mod models;
mod repository;
pub mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
