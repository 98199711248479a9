mod schema;

pub use schema::Database;

use crate::catalog::{Author, Book, Genre, PageRequest, SearchCandidate, SortSpec};
use crate::error::Result;
use serde::Serialize;

/// Entity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Number of authors.
    pub authors: i64,
    /// Number of books.
    pub books: i64,
    /// Number of genres.
    pub genres: i64,
}

/// Persistence collaborator of the catalog services.
///
/// `save_*` inserts or replaces by identifier. List methods take the
/// ordering and an optional window; a `None` window returns every match.
/// Deleting an author or a genre removes their books.
pub trait CatalogStore: Send + Sync {
    // ========== AUTHORS ==========

    /// Get author by ID.
    fn get_author(&self, id: i64) -> Result<Option<Author>>;

    /// Check whether an author exists.
    fn author_exists(&self, id: i64) -> Result<bool>;

    /// List authors.
    fn list_authors(&self, sort: &SortSpec, page: Option<&PageRequest>) -> Result<Vec<Author>>;

    /// Authors with at least one book in the genre.
    fn authors_in_genre(
        &self,
        genre_id: i64,
        sort: &SortSpec,
        page: Option<&PageRequest>,
    ) -> Result<Vec<Author>>;

    /// Author owning the book.
    fn author_of_book(&self, book_id: i64) -> Result<Option<Author>>;

    /// Number of books owned by the author.
    fn count_author_books(&self, author_id: i64) -> Result<i64>;

    /// Insert or replace an author.
    fn save_author(&self, author: &Author) -> Result<Author>;

    /// Delete an author and their books.
    fn delete_author(&self, id: i64) -> Result<bool>;

    // ========== BOOKS ==========

    /// Get book by ID.
    fn get_book(&self, id: i64) -> Result<Option<Book>>;

    /// Books with the given IDs, in no particular order. Unknown IDs are skipped.
    fn get_books(&self, ids: &[i64]) -> Result<Vec<Book>>;

    /// Check whether a book exists.
    fn book_exists(&self, id: i64) -> Result<bool>;

    /// List books.
    fn list_books(&self, sort: &SortSpec, page: Option<&PageRequest>) -> Result<Vec<Book>>;

    /// Books of one genre.
    fn books_in_genre(
        &self,
        genre_id: i64,
        sort: &SortSpec,
        page: Option<&PageRequest>,
    ) -> Result<Vec<Book>>;

    /// Books of one author.
    fn books_of_author(&self, author_id: i64, sort: &SortSpec) -> Result<Vec<Book>>;

    /// Books of one author in one genre, by ID.
    fn books_of_author_in_genre(&self, author_id: i64, genre_id: i64) -> Result<Vec<Book>>;

    /// Number of books in the genre.
    fn count_genre_books(&self, genre_id: i64) -> Result<i64>;

    /// Insert or replace a book.
    fn save_book(&self, book: &Book) -> Result<Book>;

    /// Delete a book.
    fn delete_book(&self, id: i64) -> Result<bool>;

    /// Coarse lookup: books whose name contains the query or any word.
    fn book_candidates(&self, query: &str, words: &[&str]) -> Result<Vec<SearchCandidate>>;

    // ========== GENRES ==========

    /// Get genre by ID.
    fn get_genre(&self, id: i64) -> Result<Option<Genre>>;

    /// Get genre by its unique name.
    fn get_genre_by_name(&self, name: &str) -> Result<Option<Genre>>;

    /// Check whether a genre exists.
    fn genre_exists(&self, id: i64) -> Result<bool>;

    /// Check whether a genre name is taken.
    fn genre_name_exists(&self, name: &str) -> Result<bool> {
        Ok(self.get_genre_by_name(name)?.is_some())
    }

    /// List genres.
    fn list_genres(&self, sort: &SortSpec, page: Option<&PageRequest>) -> Result<Vec<Genre>>;

    /// Genres the author has written in.
    fn genres_of_author(&self, author_id: i64, sort: &SortSpec) -> Result<Vec<Genre>>;

    /// Genre of the book.
    fn genre_of_book(&self, book_id: i64) -> Result<Option<Genre>>;

    /// Insert or replace a genre.
    fn save_genre(&self, genre: &Genre) -> Result<Genre>;

    /// Delete a genre and its books.
    fn delete_genre(&self, id: i64) -> Result<bool>;

    /// Coarse lookup, ranked by the number of matched terms, then by name.
    fn search_genres(&self, query: &str, keywords: &[&str]) -> Result<Vec<Genre>>;

    // ========== STATS ==========

    /// Entity counts.
    fn stats(&self) -> Result<CatalogStats>;
}
