//! JSON transfer objects and their mapping to catalog entities.

use crate::catalog::{Author, Book, Genre};
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest accepted name.
const MAX_NAME_LEN: usize = 255;

fn check_id(field: &str, id: i64) -> Result<()> {
    if id < 0 {
        return Err(AppError::Validation(format!("'{}' must not be negative", field)));
    }
    Ok(())
}

fn check_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("'{}' must not be blank", field)));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "'{}' must be at most {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(AppError::Validation(format!("'{}' must not be negative", field)));
    }
    Ok(())
}

// ============================================================================
// AUTHOR
// ============================================================================

/// Structured author name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorName {
    /// First part.
    pub first: String,
    /// Second part.
    pub second: String,
}

/// Author birth details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Birth {
    /// Birth date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Birth country.
    #[serde(default)]
    pub country: String,
    /// Birth city.
    #[serde(default)]
    pub city: String,
}

/// Author as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    /// Author ID.
    pub author_id: i64,
    /// Structured name.
    pub author_name: AuthorName,
    /// Nationality.
    #[serde(default)]
    pub nationality: String,
    /// Birth details.
    #[serde(default)]
    pub birth: Birth,
    /// Description.
    #[serde(default)]
    pub author_description: String,
}

impl AuthorDto {
    /// Check mandatory fields.
    pub fn validate(&self) -> Result<()> {
        check_id("authorId", self.author_id)?;
        check_name("authorName.first", &self.author_name.first)?;
        check_name("authorName.second", &self.author_name.second)
    }
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            author_id: author.id,
            author_name: AuthorName {
                first: author.first_name,
                second: author.second_name,
            },
            nationality: author.nationality,
            birth: Birth {
                date: author.birth_date,
                country: author.birth_country,
                city: author.birth_city,
            },
            author_description: author.description,
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Self {
            id: dto.author_id,
            first_name: dto.author_name.first,
            second_name: dto.author_name.second,
            nationality: dto.nationality,
            birth_date: dto.birth.date,
            birth_country: dto.birth.country,
            birth_city: dto.birth.city,
            description: dto.author_description,
        }
    }
}

// ============================================================================
// BOOK
// ============================================================================

/// Physical book dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSize {
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Length.
    #[serde(default)]
    pub length: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
}

/// Secondary book details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAdditional {
    /// Number of pages.
    #[serde(default)]
    pub page_count: i64,
    /// Dimensions.
    #[serde(default)]
    pub size: BookSize,
}

/// Book as exchanged over HTTP. Owner references travel in the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    /// Book ID.
    pub book_id: i64,
    /// Title.
    pub book_name: String,
    /// Language.
    #[serde(default)]
    pub book_language: String,
    /// Description.
    #[serde(default)]
    pub book_description: String,
    /// Year of publication.
    #[serde(default)]
    pub publication_year: i64,
    /// Page count and size.
    #[serde(default)]
    pub additional: BookAdditional,
}

impl BookDto {
    /// Check mandatory fields and numeric ranges.
    pub fn validate(&self) -> Result<()> {
        check_id("bookId", self.book_id)?;
        check_name("bookName", &self.book_name)?;
        check_id("publicationYear", self.publication_year)?;
        check_id("additional.pageCount", self.additional.page_count)?;
        let size = &self.additional.size;
        check_non_negative("additional.size.width", size.width)?;
        check_non_negative("additional.size.length", size.length)?;
        check_non_negative("additional.size.height", size.height)
    }

    /// Build the entity, attaching its owners.
    pub fn into_book(self, author_id: i64, genre_id: i64) -> Book {
        Book {
            id: self.book_id,
            name: self.book_name,
            language: self.book_language,
            description: self.book_description,
            publication_year: self.publication_year,
            page_count: self.additional.page_count,
            width: self.additional.size.width,
            length: self.additional.size.length,
            height: self.additional.size.height,
            author_id,
            genre_id,
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.id,
            book_name: book.name,
            book_language: book.language,
            book_description: book.description,
            publication_year: book.publication_year,
            additional: BookAdditional {
                page_count: book.page_count,
                size: BookSize {
                    width: book.width,
                    length: book.length,
                    height: book.height,
                },
            },
        }
    }
}

// ============================================================================
// GENRE
// ============================================================================

/// Genre as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    /// Genre ID.
    pub genre_id: i64,
    /// Unique name.
    pub genre_name: String,
    /// Description.
    #[serde(default)]
    pub genre_description: String,
}

impl GenreDto {
    /// Check mandatory fields.
    pub fn validate(&self) -> Result<()> {
        check_id("genreId", self.genre_id)?;
        check_name("genreName", &self.genre_name)
    }
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            genre_id: genre.id,
            genre_name: genre.name,
            genre_description: genre.description,
        }
    }
}

impl From<GenreDto> for Genre {
    fn from(dto: GenreDto) -> Self {
        Self {
            id: dto.genre_id,
            name: dto.genre_name,
            description: dto.genre_description,
        }
    }
}

/// Map a list of entities to transfer objects.
pub fn map_all<E, D: From<E>>(entities: Vec<E>) -> Vec<D> {
    entities.into_iter().map(D::from).collect()
}
