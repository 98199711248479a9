use super::{ensure_exists, ensure_same_id, found};
use crate::catalog::{Author, EntityGroup, ListParams};
use crate::config::PaginationMode;
use crate::db::CatalogStore;
use crate::dto::{AuthorDto, map_all};
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Author operations.
pub struct AuthorService {
    store: Arc<dyn CatalogStore>,
    pagination: PaginationMode,
}

impl AuthorService {
    /// Create a new author service.
    pub fn new(store: Arc<dyn CatalogStore>, pagination: PaginationMode) -> Self {
        Self { store, pagination }
    }

    /// Get one author.
    pub fn find_author(&self, author_id: i64) -> Result<AuthorDto> {
        let author = found(
            self.store.get_author(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;
        Ok(author.into())
    }

    /// Get the author of a book.
    pub fn find_author_of_book(&self, book_id: i64) -> Result<AuthorDto> {
        // Authors outlive their books, so a miss means the book is missing.
        let author = found(
            self.store.author_of_book(book_id)?,
            EntityGroup::Book,
            book_id,
        )?;
        Ok(author.into())
    }

    /// List authors.
    pub fn find_all_authors(&self, params: &ListParams) -> Result<Vec<AuthorDto>> {
        let query = params.resolve(EntityGroup::Author)?;
        let authors = query.fetch(self.pagination, |sort, page| {
            self.store.list_authors(sort, page)
        })?;
        Ok(map_all(authors))
    }

    /// List authors with books in a genre.
    pub fn find_authors_in_genre(
        &self,
        genre_id: i64,
        params: &ListParams,
    ) -> Result<Vec<AuthorDto>> {
        let query = params.resolve(EntityGroup::Author)?;
        ensure_exists(
            self.store.genre_exists(genre_id)?,
            EntityGroup::Genre,
            genre_id,
        )?;

        let authors = query.fetch(self.pagination, |sort, page| {
            self.store.authors_in_genre(genre_id, sort, page)
        })?;
        Ok(map_all(authors))
    }

    /// Create an author.
    pub fn add_author(&self, dto: AuthorDto) -> Result<AuthorDto> {
        dto.validate()?;

        if self.store.author_exists(dto.author_id)? {
            return Err(AppError::AlreadyExists {
                entity: EntityGroup::Author,
            });
        }

        let saved = self.store.save_author(&Author::from(dto))?;
        tracing::info!(author_id = saved.id, name = %saved.full_name(), "Author created");
        Ok(saved.into())
    }

    /// Replace an existing author.
    pub fn update_author(&self, author_id: i64, dto: AuthorDto) -> Result<AuthorDto> {
        dto.validate()?;
        found(
            self.store.get_author(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;
        ensure_same_id(author_id, dto.author_id)?;

        let saved = self.store.save_author(&Author::from(dto))?;
        tracing::info!(author_id, "Author updated");
        Ok(saved.into())
    }

    /// Delete an author. Their books go too when `forcibly` is set.
    pub fn delete_author(&self, author_id: i64, forcibly: bool) -> Result<AuthorDto> {
        let author = found(
            self.store.get_author(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;

        let count = self.store.count_author_books(author_id)?;
        if count > 0 && !forcibly {
            return Err(AppError::RelatedEntitiesPresent {
                entity: EntityGroup::Author,
                id: author_id,
                count,
            });
        }

        self.store.delete_author(author_id)?;
        tracing::info!(author_id, books = count, "Author deleted");
        Ok(author.into())
    }
}
