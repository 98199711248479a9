use crate::catalog::{Author, Book, EntityGroup, Genre, PageRequest, SearchCandidate, SortSpec};
use crate::db::{CatalogStats, CatalogStore};
use crate::error::{AppError, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Params, params, params_from_iter};
use std::path::Path;
use std::sync::Arc;

const AUTHOR_COLUMNS: &str = "author_id, first_name, second_name, nationality, birth_date, \
                              birth_country, birth_city, author_description";

const BOOK_COLUMNS: &str = "book_id, book_name, book_language, book_description, \
                            publication_year, page_count, book_width, book_length, book_height, \
                            author_id, genre_id";

const GENRE_COLUMNS: &str = "genre_id, genre_name, genre_description";

/// `LIMIT`/`OFFSET` suffix for an optional window.
fn window(page: Option<&PageRequest>) -> String {
    match page {
        Some(page) => format!(
            " LIMIT {} OFFSET {}",
            i64::try_from(page.size()).unwrap_or(i64::MAX),
            i64::try_from(page.offset()).unwrap_or(i64::MAX)
        ),
        None => String::new(),
    }
}

/// Wrap a user term into a `LIKE ... ESCAPE '\'` containment pattern.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Distinct, non-empty search terms: the full query first, then the words.
fn search_terms(query: &str, words: &[&str]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::with_capacity(words.len() + 1);
    for term in std::iter::once(query).chain(words.iter().copied()) {
        let pattern = contains_pattern(term);
        if !term.is_empty() && !terms.contains(&pattern) {
            terms.push(pattern);
        }
    }
    terms
}

/// Database wrapper for thread-safe access.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            -- Forced deletes cascade to books
            PRAGMA foreign_keys = ON;

            -- Authors table
            CREATE TABLE IF NOT EXISTS authors (
                author_id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                second_name TEXT NOT NULL,
                nationality TEXT NOT NULL DEFAULT '',
                birth_date TEXT,
                birth_country TEXT NOT NULL DEFAULT '',
                birth_city TEXT NOT NULL DEFAULT '',
                author_description TEXT NOT NULL DEFAULT ''
            );

            -- Genres table
            CREATE TABLE IF NOT EXISTS genres (
                genre_id INTEGER PRIMARY KEY,
                genre_name TEXT UNIQUE NOT NULL,
                genre_description TEXT NOT NULL DEFAULT ''
            );

            -- Books table
            CREATE TABLE IF NOT EXISTS books (
                book_id INTEGER PRIMARY KEY,
                book_name TEXT NOT NULL,
                book_language TEXT NOT NULL DEFAULT '',
                book_description TEXT NOT NULL DEFAULT '',
                publication_year INTEGER NOT NULL DEFAULT 0,
                page_count INTEGER NOT NULL DEFAULT 0,
                book_width REAL NOT NULL DEFAULT 0,
                book_length REAL NOT NULL DEFAULT 0,
                book_height REAL NOT NULL DEFAULT 0,
                author_id INTEGER NOT NULL,
                genre_id INTEGER NOT NULL,
                FOREIGN KEY (author_id) REFERENCES authors(author_id) ON DELETE CASCADE,
                FOREIGN KEY (genre_id) REFERENCES genres(genre_id) ON DELETE CASCADE
            );

            -- Indexes
            CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id);
            CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre_id);
            CREATE INDEX IF NOT EXISTS idx_books_name ON books(book_name);
            "#,
        )
        .map_err(|e| AppError::Internal(format!("Failed to initialize schema: {}", e)))?;

        Ok(())
    }

    /// Run a query returning many rows.
    fn query_all<T, P: Params>(
        &self,
        sql: &str,
        params: P,
        map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
        what: &str,
    ) -> Result<Vec<T>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| AppError::Internal(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params, map)
            .map_err(|e| AppError::Internal(format!("Failed to get {}: {}", what, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(format!("Failed to collect {}: {}", what, e)))?;

        Ok(rows)
    }

    /// Run a query returning at most one row.
    fn query_one<T, P: Params>(
        &self,
        sql: &str,
        params: P,
        map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
        what: &str,
    ) -> Result<Option<T>> {
        let conn = self.conn.lock();
        conn.query_row(sql, params, map)
            .optional()
            .map_err(|e| AppError::Internal(format!("Failed to get {}: {}", what, e)))
    }

    /// Run a single-value `COUNT`/`EXISTS` query.
    fn query_count<P: Params>(&self, sql: &str, params: P, what: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(sql, params, |row| row.get(0))
            .map_err(|e| AppError::Internal(format!("Failed to count {}: {}", what, e)))
    }

    /// Run a statement, returning affected rows.
    fn execute<P: Params>(&self, sql: &str, params: P, what: &str) -> Result<usize> {
        let conn = self.conn.lock();
        conn.execute(sql, params)
            .map_err(|e| AppError::Internal(format!("Failed to {}: {}", what, e)))
    }

    /// Helper to convert a row to Author.
    fn row_to_author(row: &rusqlite::Row<'_>) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get(0)?,
            first_name: row.get(1)?,
            second_name: row.get(2)?,
            nationality: row.get(3)?,
            birth_date: row.get(4)?,
            birth_country: row.get(5)?,
            birth_city: row.get(6)?,
            description: row.get(7)?,
        })
    }

    /// Helper to convert a row to Book.
    fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            name: row.get(1)?,
            language: row.get(2)?,
            description: row.get(3)?,
            publication_year: row.get(4)?,
            page_count: row.get(5)?,
            width: row.get(6)?,
            length: row.get(7)?,
            height: row.get(8)?,
            author_id: row.get(9)?,
            genre_id: row.get(10)?,
        })
    }

    /// Helper to convert a row to Genre.
    fn row_to_genre(row: &rusqlite::Row<'_>) -> rusqlite::Result<Genre> {
        Ok(Genre {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
        })
    }

    /// Helper to convert a row to SearchCandidate.
    fn row_to_candidate(row: &rusqlite::Row<'_>) -> rusqlite::Result<SearchCandidate> {
        Ok(SearchCandidate {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

impl CatalogStore for Database {
    // ========== AUTHOR OPERATIONS ==========

    fn get_author(&self, id: i64) -> Result<Option<Author>> {
        self.query_one(
            &format!("SELECT {} FROM authors WHERE author_id = ?1", AUTHOR_COLUMNS),
            params![id],
            Self::row_to_author,
            "author",
        )
    }

    fn author_exists(&self, id: i64) -> Result<bool> {
        let found = self.query_count(
            "SELECT EXISTS (SELECT 1 FROM authors WHERE author_id = ?1)",
            params![id],
            "authors",
        )?;
        Ok(found != 0)
    }

    fn list_authors(&self, sort: &SortSpec, page: Option<&PageRequest>) -> Result<Vec<Author>> {
        self.query_all(
            &format!(
                "SELECT {} FROM authors {}{}",
                AUTHOR_COLUMNS,
                sort.order_by(),
                window(page)
            ),
            [],
            Self::row_to_author,
            "authors",
        )
    }

    fn authors_in_genre(
        &self,
        genre_id: i64,
        sort: &SortSpec,
        page: Option<&PageRequest>,
    ) -> Result<Vec<Author>> {
        self.query_all(
            &format!(
                "SELECT {} FROM authors
                 WHERE author_id IN (SELECT author_id FROM books WHERE genre_id = ?1)
                 {}{}",
                AUTHOR_COLUMNS,
                sort.order_by(),
                window(page)
            ),
            params![genre_id],
            Self::row_to_author,
            "authors in genre",
        )
    }

    fn author_of_book(&self, book_id: i64) -> Result<Option<Author>> {
        self.query_one(
            &format!(
                "SELECT {} FROM authors
                 WHERE author_id = (SELECT author_id FROM books WHERE book_id = ?1)",
                AUTHOR_COLUMNS
            ),
            params![book_id],
            Self::row_to_author,
            "author of book",
        )
    }

    fn count_author_books(&self, author_id: i64) -> Result<i64> {
        self.query_count(
            "SELECT COUNT(*) FROM books WHERE author_id = ?1",
            params![author_id],
            "author books",
        )
    }

    fn save_author(&self, author: &Author) -> Result<Author> {
        self.execute(
            "INSERT INTO authors
             (author_id, first_name, second_name, nationality, birth_date, birth_country,
              birth_city, author_description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (author_id) DO UPDATE SET
                first_name = excluded.first_name,
                second_name = excluded.second_name,
                nationality = excluded.nationality,
                birth_date = excluded.birth_date,
                birth_country = excluded.birth_country,
                birth_city = excluded.birth_city,
                author_description = excluded.author_description",
            params![
                author.id,
                author.first_name,
                author.second_name,
                author.nationality,
                author.birth_date,
                author.birth_country,
                author.birth_city,
                author.description,
            ],
            "save author",
        )?;

        self.get_author(author.id)?
            .ok_or_else(|| AppError::Internal(format!("Author {} vanished after save", author.id)))
    }

    fn delete_author(&self, id: i64) -> Result<bool> {
        let rows = self.execute(
            "DELETE FROM authors WHERE author_id = ?1",
            params![id],
            "delete author",
        )?;
        Ok(rows > 0)
    }

    // ========== BOOK OPERATIONS ==========

    fn get_book(&self, id: i64) -> Result<Option<Book>> {
        self.query_one(
            &format!("SELECT {} FROM books WHERE book_id = ?1", BOOK_COLUMNS),
            params![id],
            Self::row_to_book,
            "book",
        )
    }

    fn get_books(&self, ids: &[i64]) -> Result<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=ids.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        self.query_all(
            &format!(
                "SELECT {} FROM books WHERE book_id IN ({})",
                BOOK_COLUMNS, placeholders
            ),
            params_from_iter(ids.iter()),
            Self::row_to_book,
            "books by id",
        )
    }

    fn book_exists(&self, id: i64) -> Result<bool> {
        let found = self.query_count(
            "SELECT EXISTS (SELECT 1 FROM books WHERE book_id = ?1)",
            params![id],
            "books",
        )?;
        Ok(found != 0)
    }

    fn list_books(&self, sort: &SortSpec, page: Option<&PageRequest>) -> Result<Vec<Book>> {
        self.query_all(
            &format!(
                "SELECT {} FROM books {}{}",
                BOOK_COLUMNS,
                sort.order_by(),
                window(page)
            ),
            [],
            Self::row_to_book,
            "books",
        )
    }

    fn books_in_genre(
        &self,
        genre_id: i64,
        sort: &SortSpec,
        page: Option<&PageRequest>,
    ) -> Result<Vec<Book>> {
        self.query_all(
            &format!(
                "SELECT {} FROM books WHERE genre_id = ?1 {}{}",
                BOOK_COLUMNS,
                sort.order_by(),
                window(page)
            ),
            params![genre_id],
            Self::row_to_book,
            "books in genre",
        )
    }

    fn books_of_author(&self, author_id: i64, sort: &SortSpec) -> Result<Vec<Book>> {
        self.query_all(
            &format!(
                "SELECT {} FROM books WHERE author_id = ?1 {}",
                BOOK_COLUMNS,
                sort.order_by()
            ),
            params![author_id],
            Self::row_to_book,
            "books of author",
        )
    }

    fn books_of_author_in_genre(&self, author_id: i64, genre_id: i64) -> Result<Vec<Book>> {
        self.query_all(
            &format!(
                "SELECT {} FROM books WHERE author_id = ?1 AND genre_id = ?2 ORDER BY book_id",
                BOOK_COLUMNS
            ),
            params![author_id, genre_id],
            Self::row_to_book,
            "books of author in genre",
        )
    }

    fn count_genre_books(&self, genre_id: i64) -> Result<i64> {
        self.query_count(
            "SELECT COUNT(*) FROM books WHERE genre_id = ?1",
            params![genre_id],
            "genre books",
        )
    }

    fn save_book(&self, book: &Book) -> Result<Book> {
        self.execute(
            "INSERT INTO books
             (book_id, book_name, book_language, book_description, publication_year, page_count,
              book_width, book_length, book_height, author_id, genre_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT (book_id) DO UPDATE SET
                book_name = excluded.book_name,
                book_language = excluded.book_language,
                book_description = excluded.book_description,
                publication_year = excluded.publication_year,
                page_count = excluded.page_count,
                book_width = excluded.book_width,
                book_length = excluded.book_length,
                book_height = excluded.book_height,
                author_id = excluded.author_id,
                genre_id = excluded.genre_id",
            params![
                book.id,
                book.name,
                book.language,
                book.description,
                book.publication_year,
                book.page_count,
                book.width,
                book.length,
                book.height,
                book.author_id,
                book.genre_id,
            ],
            "save book",
        )?;

        self.get_book(book.id)?
            .ok_or_else(|| AppError::Internal(format!("Book {} vanished after save", book.id)))
    }

    fn delete_book(&self, id: i64) -> Result<bool> {
        let rows = self.execute(
            "DELETE FROM books WHERE book_id = ?1",
            params![id],
            "delete book",
        )?;
        Ok(rows > 0)
    }

    fn book_candidates(&self, query: &str, words: &[&str]) -> Result<Vec<SearchCandidate>> {
        let terms = search_terms(query, words);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let filter = (1..=terms.len())
            .map(|i| format!("book_name LIKE ?{} ESCAPE '\\'", i))
            .collect::<Vec<_>>()
            .join(" OR ");

        self.query_all(
            &format!(
                "SELECT book_id, book_name FROM books WHERE {} ORDER BY book_id",
                filter
            ),
            params_from_iter(terms.iter()),
            Self::row_to_candidate,
            "book candidates",
        )
    }

    // ========== GENRE OPERATIONS ==========

    fn get_genre(&self, id: i64) -> Result<Option<Genre>> {
        self.query_one(
            &format!("SELECT {} FROM genres WHERE genre_id = ?1", GENRE_COLUMNS),
            params![id],
            Self::row_to_genre,
            "genre",
        )
    }

    fn get_genre_by_name(&self, name: &str) -> Result<Option<Genre>> {
        self.query_one(
            &format!("SELECT {} FROM genres WHERE genre_name = ?1", GENRE_COLUMNS),
            params![name],
            Self::row_to_genre,
            "genre by name",
        )
    }

    fn genre_exists(&self, id: i64) -> Result<bool> {
        let found = self.query_count(
            "SELECT EXISTS (SELECT 1 FROM genres WHERE genre_id = ?1)",
            params![id],
            "genres",
        )?;
        Ok(found != 0)
    }

    fn list_genres(&self, sort: &SortSpec, page: Option<&PageRequest>) -> Result<Vec<Genre>> {
        self.query_all(
            &format!(
                "SELECT {} FROM genres {}{}",
                GENRE_COLUMNS,
                sort.order_by(),
                window(page)
            ),
            [],
            Self::row_to_genre,
            "genres",
        )
    }

    fn genres_of_author(&self, author_id: i64, sort: &SortSpec) -> Result<Vec<Genre>> {
        self.query_all(
            &format!(
                "SELECT {} FROM genres
                 WHERE genre_id IN (SELECT genre_id FROM books WHERE author_id = ?1)
                 {}",
                GENRE_COLUMNS,
                sort.order_by()
            ),
            params![author_id],
            Self::row_to_genre,
            "genres of author",
        )
    }

    fn genre_of_book(&self, book_id: i64) -> Result<Option<Genre>> {
        self.query_one(
            &format!(
                "SELECT {} FROM genres
                 WHERE genre_id = (SELECT genre_id FROM books WHERE book_id = ?1)",
                GENRE_COLUMNS
            ),
            params![book_id],
            Self::row_to_genre,
            "genre of book",
        )
    }

    fn save_genre(&self, genre: &Genre) -> Result<Genre> {
        {
            let conn = self.conn.lock();
            conn.execute(
                "INSERT INTO genres (genre_id, genre_name, genre_description)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (genre_id) DO UPDATE SET
                    genre_name = excluded.genre_name,
                    genre_description = excluded.genre_description",
                params![genre.id, genre.name, genre.description],
            )
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint") {
                    AppError::NameConflict {
                        entity: EntityGroup::Genre,
                    }
                } else {
                    AppError::Internal(format!("Failed to save genre: {}", e))
                }
            })?;
        }

        self.get_genre(genre.id)?
            .ok_or_else(|| AppError::Internal(format!("Genre {} vanished after save", genre.id)))
    }

    fn delete_genre(&self, id: i64) -> Result<bool> {
        let rows = self.execute(
            "DELETE FROM genres WHERE genre_id = ?1",
            params![id],
            "delete genre",
        )?;
        Ok(rows > 0)
    }

    fn search_genres(&self, query: &str, keywords: &[&str]) -> Result<Vec<Genre>> {
        let terms = search_terms(query, keywords);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        // Full-query name hits weigh double.
        let score = (1..=terms.len())
            .map(|i| {
                let weight = if i == 1 { " * 2" } else { "" };
                format!(
                    "(genre_name LIKE ?{i} ESCAPE '\\'){weight} + (genre_description LIKE ?{i} ESCAPE '\\')"
                )
            })
            .collect::<Vec<_>>()
            .join(" + ");

        self.query_all(
            &format!(
                "SELECT {cols} FROM (SELECT {cols}, {score} AS score FROM genres)
                 WHERE score > 0
                 ORDER BY score DESC, genre_name ASC, genre_id ASC",
                cols = GENRE_COLUMNS,
                score = score
            ),
            params_from_iter(terms.iter()),
            Self::row_to_genre,
            "genres",
        )
    }

    // ========== STATS ==========

    fn stats(&self) -> Result<CatalogStats> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT (SELECT COUNT(*) FROM authors),
                    (SELECT COUNT(*) FROM books),
                    (SELECT COUNT(*) FROM genres)",
            [],
            |row| {
                Ok(CatalogStats {
                    authors: row.get(0)?,
                    books: row.get(1)?,
                    genres: row.get(2)?,
                })
            },
        )
        .map_err(|e| AppError::Internal(format!("Failed to get stats: {}", e)))
    }
}
