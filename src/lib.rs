//! library-catalog: a REST catalog of authors, books and genres.
//!
//! Records live in SQLite. Every list endpoint shares one pipeline:
//! a public sort key and order type, then an optional page window cut
//! either in SQL or in memory. Book search ranks candidates by the
//! longest matching name prefix of the query.
//!
//! # Features
//!
//! - CRUD for authors, books and genres with relation lookups
//! - Sorting by any public field, plus computed book square and volume
//! - Storage or in-memory pagination
//! - Prefix-tier book search and ranked genre search
//! - Forced deletion cascading to books

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Catalog domain: entities, ordering, pages and search ranking.
pub mod catalog;
/// Configuration and CLI.
pub mod config;
/// Database operations.
pub mod db;
/// Transport shapes and entity mapping.
pub mod dto;
/// Error types.
pub mod error;
/// HTTP server.
pub mod server;
/// Entity services.
pub mod service;

#[cfg(test)]
mod tests;

pub use config::{Cli, Command, Config};
pub use db::{CatalogStore, Database};
pub use error::{AppError, Result};
pub use server::AppState;
