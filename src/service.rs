//! Entity services: existence checks, list pipeline, storage and mapping.

mod author;
mod book;
mod genre;

pub use author::AuthorService;
pub use book::BookService;
pub use genre::GenreService;

use crate::catalog::EntityGroup;
use crate::error::{AppError, Result};

/// Unwrap a lookup or report the entity as missing.
fn found<T>(value: Option<T>, entity: EntityGroup, id: i64) -> Result<T> {
    value.ok_or(AppError::NotFound { entity, id })
}

/// Fail with `NotFound` unless `exists`.
fn ensure_exists(exists: bool, entity: EntityGroup, id: i64) -> Result<()> {
    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound { entity, id })
    }
}

/// Path and body must name the same record.
fn ensure_same_id(path_id: i64, body_id: i64) -> Result<()> {
    if path_id != body_id {
        return Err(AppError::IdMismatch);
    }
    Ok(())
}
