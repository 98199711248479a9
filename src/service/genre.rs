use super::{ensure_exists, ensure_same_id, found};
use crate::catalog::search::{self, GENRE_QUERY_MINIMUM};
use crate::catalog::{EntityGroup, Genre, ListParams, OrderParams};
use crate::config::PaginationMode;
use crate::db::CatalogStore;
use crate::dto::{GenreDto, map_all};
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Genre operations.
pub struct GenreService {
    store: Arc<dyn CatalogStore>,
    pagination: PaginationMode,
}

impl GenreService {
    /// Create a new genre service.
    pub fn new(store: Arc<dyn CatalogStore>, pagination: PaginationMode) -> Self {
        Self { store, pagination }
    }

    /// Get one genre.
    pub fn find_genre(&self, genre_id: i64) -> Result<GenreDto> {
        let genre = found(self.store.get_genre(genre_id)?, EntityGroup::Genre, genre_id)?;
        Ok(genre.into())
    }

    /// Get the genre of a book.
    pub fn find_genre_of_book(&self, book_id: i64) -> Result<GenreDto> {
        let genre = found(
            self.store.genre_of_book(book_id)?,
            EntityGroup::Book,
            book_id,
        )?;
        Ok(genre.into())
    }

    /// List genres.
    pub fn find_all_genres(&self, params: &ListParams) -> Result<Vec<GenreDto>> {
        let query = params.resolve(EntityGroup::Genre)?;
        let genres = query.fetch(self.pagination, |sort, page| {
            self.store.list_genres(sort, page)
        })?;
        Ok(map_all(genres))
    }

    /// List genres an author has written in.
    pub fn find_genres_of_author(
        &self,
        author_id: i64,
        params: &OrderParams,
    ) -> Result<Vec<GenreDto>> {
        let sort = params.resolve(EntityGroup::Genre)?;
        ensure_exists(
            self.store.author_exists(author_id)?,
            EntityGroup::Author,
            author_id,
        )?;

        Ok(map_all(self.store.genres_of_author(author_id, &sort)?))
    }

    /// Search genres. Ranking is left to storage.
    pub fn search_genres(&self, raw_query: &str) -> Result<Vec<GenreDto>> {
        let query = search::validate_query(raw_query, GENRE_QUERY_MINIMUM)?;
        let keywords = search::genre_keywords(query);

        let genres = self.store.search_genres(query, &keywords)?;
        tracing::debug!(query, keywords = keywords.len(), hits = genres.len(), "Genre search");
        Ok(map_all(genres))
    }

    /// Create a genre with a unique ID and name.
    pub fn add_genre(&self, dto: GenreDto) -> Result<GenreDto> {
        dto.validate()?;

        if self.store.genre_exists(dto.genre_id)? {
            return Err(AppError::AlreadyExists {
                entity: EntityGroup::Genre,
            });
        }

        if self.store.genre_name_exists(&dto.genre_name)? {
            return Err(AppError::NameConflict {
                entity: EntityGroup::Genre,
            });
        }

        let saved = self.store.save_genre(&Genre::from(dto))?;
        tracing::info!(genre_id = saved.id, name = %saved.name, "Genre created");
        Ok(saved.into())
    }

    /// Replace an existing genre.
    pub fn update_genre(&self, genre_id: i64, dto: GenreDto) -> Result<GenreDto> {
        dto.validate()?;
        found(self.store.get_genre(genre_id)?, EntityGroup::Genre, genre_id)?;
        ensure_same_id(genre_id, dto.genre_id)?;

        if let Some(owner) = self.store.get_genre_by_name(&dto.genre_name)?
            && owner.id != genre_id
        {
            return Err(AppError::NameConflict {
                entity: EntityGroup::Genre,
            });
        }

        let saved = self.store.save_genre(&Genre::from(dto))?;
        tracing::info!(genre_id, "Genre updated");
        Ok(saved.into())
    }

    /// Delete a genre. Its books go too when `forcibly` is set.
    pub fn delete_genre(&self, genre_id: i64, forcibly: bool) -> Result<()> {
        found(self.store.get_genre(genre_id)?, EntityGroup::Genre, genre_id)?;

        let count = self.store.count_genre_books(genre_id)?;
        if count > 0 && !forcibly {
            return Err(AppError::RelatedEntitiesPresent {
                entity: EntityGroup::Genre,
                id: genre_id,
                count,
            });
        }

        self.store.delete_genre(genre_id)?;
        tracing::info!(genre_id, books = count, "Genre deleted");
        Ok(())
    }
}
