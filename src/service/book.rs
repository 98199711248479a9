use super::{ensure_exists, ensure_same_id, found};
use crate::catalog::search::{self, BOOK_QUERY_MINIMUM};
use crate::catalog::{Book, EntityGroup, ListParams, OrderParams};
use crate::config::PaginationMode;
use crate::db::CatalogStore;
use crate::dto::{BookDto, map_all};
use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Book operations.
pub struct BookService {
    store: Arc<dyn CatalogStore>,
    pagination: PaginationMode,
}

impl BookService {
    /// Create a new book service.
    pub fn new(store: Arc<dyn CatalogStore>, pagination: PaginationMode) -> Self {
        Self { store, pagination }
    }

    /// Get one book.
    pub fn find_book(&self, book_id: i64) -> Result<BookDto> {
        let book = found(self.store.get_book(book_id)?, EntityGroup::Book, book_id)?;
        Ok(book.into())
    }

    /// List books.
    pub fn find_all_books(&self, params: &ListParams) -> Result<Vec<BookDto>> {
        let query = params.resolve(EntityGroup::Book)?;
        let books = query.fetch(self.pagination, |sort, page| {
            self.store.list_books(sort, page)
        })?;
        Ok(map_all(books))
    }

    /// List books of one genre.
    pub fn find_books_in_genre(&self, genre_id: i64, params: &ListParams) -> Result<Vec<BookDto>> {
        let query = params.resolve(EntityGroup::Book)?;
        ensure_exists(
            self.store.genre_exists(genre_id)?,
            EntityGroup::Genre,
            genre_id,
        )?;

        let books = query.fetch(self.pagination, |sort, page| {
            self.store.books_in_genre(genre_id, sort, page)
        })?;
        Ok(map_all(books))
    }

    /// List every book of an author.
    pub fn find_author_books(&self, author_id: i64, params: &OrderParams) -> Result<Vec<BookDto>> {
        let sort = params.resolve(EntityGroup::Book)?;
        ensure_exists(
            self.store.author_exists(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;

        Ok(map_all(self.store.books_of_author(author_id, &sort)?))
    }

    /// List books of an author in one genre.
    pub fn find_books_of_author_in_genre(
        &self,
        author_id: i64,
        genre_id: i64,
    ) -> Result<Vec<BookDto>> {
        ensure_exists(
            self.store.author_exists(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;
        ensure_exists(
            self.store.genre_exists(genre_id)?,
            EntityGroup::Genre,
            genre_id,
        )?;

        Ok(map_all(
            self.store.books_of_author_in_genre(author_id, genre_id)?,
        ))
    }

    /// Search books by name, best prefix matches first, five at most.
    pub fn search_books(&self, raw_query: &str) -> Result<Vec<BookDto>> {
        let query = search::validate_query(raw_query, BOOK_QUERY_MINIMUM)?;
        let words = search::query_words(query);

        let candidates = self.store.book_candidates(query, &words)?;
        let total = candidates.len();
        let ranked = search::narrow(query, candidates);

        let ids: Vec<i64> = ranked.iter().map(|c| c.id).collect();
        let mut loaded: HashMap<i64, Book> = self
            .store
            .get_books(&ids)?
            .into_iter()
            .map(|book| (book.id, book))
            .collect();

        // Rank order; hits deleted since the coarse lookup drop out.
        let books: Vec<BookDto> = ids
            .iter()
            .filter_map(|id| loaded.remove(id))
            .map(BookDto::from)
            .collect();

        tracing::debug!(query, candidates = total, hits = books.len(), "Book search");
        Ok(books)
    }

    /// Create a book owned by an existing author and genre.
    pub fn add_book(&self, author_id: i64, genre_id: i64, dto: BookDto) -> Result<BookDto> {
        dto.validate()?;
        ensure_exists(
            self.store.author_exists(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;
        ensure_exists(
            self.store.genre_exists(genre_id)?,
            EntityGroup::Genre,
            genre_id,
        )?;

        if self.store.book_exists(dto.book_id)? {
            return Err(AppError::AlreadyExists {
                entity: EntityGroup::Book,
            });
        }

        let saved = self.store.save_book(&dto.into_book(author_id, genre_id))?;
        tracing::info!(book_id = saved.id, author_id, genre_id, "Book created");
        Ok(saved.into())
    }

    /// Replace an existing book. Owners are kept.
    pub fn update_book(&self, book_id: i64, dto: BookDto) -> Result<BookDto> {
        dto.validate()?;
        let current = found(self.store.get_book(book_id)?, EntityGroup::Book, book_id)?;
        ensure_same_id(book_id, dto.book_id)?;

        let saved = self
            .store
            .save_book(&dto.into_book(current.author_id, current.genre_id))?;
        tracing::info!(book_id, "Book updated");
        Ok(saved.into())
    }

    /// Delete a book.
    pub fn delete_book(&self, book_id: i64) -> Result<()> {
        found(self.store.get_book(book_id)?, EntityGroup::Book, book_id)?;
        self.store.delete_book(book_id)?;
        tracing::info!(book_id, "Book deleted");
        Ok(())
    }
}
