//! Application state shared across handlers.

use crate::config::Config;
use crate::db::{CatalogStore, Database};
use crate::service::{AuthorService, BookService, GenreService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Author operations.
    pub authors: Arc<AuthorService>,
    /// Book operations.
    pub books: Arc<BookService>,
    /// Genre operations.
    pub genres: Arc<GenreService>,
}

impl AppState {
    /// Create application state with the services wired to `db`.
    pub fn new_with_db(config: &Config, db: Database) -> Self {
        let store: Arc<dyn CatalogStore> = Arc::new(db.clone());
        let mode = config.pagination.mode;

        Self {
            authors: Arc::new(AuthorService::new(store.clone(), mode)),
            books: Arc::new(BookService::new(store.clone(), mode)),
            genres: Arc::new(GenreService::new(store, mode)),
            db,
        }
    }
}
