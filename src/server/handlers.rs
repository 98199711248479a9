//! HTTP request handlers.

use crate::catalog::{ListParams, OrderParams};
use crate::db::{CatalogStats, CatalogStore};
use crate::dto::{AuthorDto, BookDto, GenreDto};
use crate::error::Result;
use crate::server::AppState;
use crate::server::extract::{JsonBody, PathParams, QueryParams};
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
}

/// Delete parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ForceParams {
    forcibly: Option<bool>,
}

impl ForceParams {
    fn forcibly(&self) -> bool {
        self.forcibly.unwrap_or(false)
    }
}

// ============================================================================
// AUTHORS
// ============================================================================

/// Get author by ID.
pub async fn get_author(
    State(state): State<AppState>,
    PathParams(author_id): PathParams<i64>,
) -> Result<Json<AuthorDto>> {
    Ok(Json(state.authors.find_author(author_id)?))
}

/// Get the author of a book.
pub async fn get_author_of_book(
    State(state): State<AppState>,
    PathParams(book_id): PathParams<i64>,
) -> Result<Json<AuthorDto>> {
    Ok(Json(state.authors.find_author_of_book(book_id)?))
}

/// List authors.
pub async fn list_authors(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<AuthorDto>>> {
    Ok(Json(state.authors.find_all_authors(&params)?))
}

/// List authors writing in a genre.
pub async fn list_authors_in_genre(
    State(state): State<AppState>,
    PathParams(genre_id): PathParams<i64>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<AuthorDto>>> {
    Ok(Json(state.authors.find_authors_in_genre(genre_id, &params)?))
}

/// Create an author.
pub async fn create_author(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AuthorDto>,
) -> Result<(StatusCode, Json<AuthorDto>)> {
    let author = state.authors.add_author(req)?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Replace an author.
pub async fn update_author(
    State(state): State<AppState>,
    PathParams(author_id): PathParams<i64>,
    JsonBody(req): JsonBody<AuthorDto>,
) -> Result<Json<AuthorDto>> {
    Ok(Json(state.authors.update_author(author_id, req)?))
}

/// Delete an author, returning the removed record.
pub async fn delete_author(
    State(state): State<AppState>,
    PathParams(author_id): PathParams<i64>,
    QueryParams(params): QueryParams<ForceParams>,
) -> Result<Json<AuthorDto>> {
    Ok(Json(
        state.authors.delete_author(author_id, params.forcibly())?,
    ))
}

// ============================================================================
// BOOKS
// ============================================================================

/// Get book by ID.
pub async fn get_book(
    State(state): State<AppState>,
    PathParams(book_id): PathParams<i64>,
) -> Result<Json<BookDto>> {
    Ok(Json(state.books.find_book(book_id)?))
}

/// List books.
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<BookDto>>> {
    Ok(Json(state.books.find_all_books(&params)?))
}

/// List books of a genre.
pub async fn list_books_in_genre(
    State(state): State<AppState>,
    PathParams(genre_id): PathParams<i64>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<BookDto>>> {
    Ok(Json(state.books.find_books_in_genre(genre_id, &params)?))
}

/// List all books of an author.
pub async fn list_author_books(
    State(state): State<AppState>,
    PathParams(author_id): PathParams<i64>,
    QueryParams(params): QueryParams<OrderParams>,
) -> Result<Json<Vec<BookDto>>> {
    Ok(Json(state.books.find_author_books(author_id, &params)?))
}

/// List books of an author in a genre.
pub async fn list_author_books_in_genre(
    State(state): State<AppState>,
    PathParams((author_id, genre_id)): PathParams<(i64, i64)>,
) -> Result<Json<Vec<BookDto>>> {
    Ok(Json(
        state
            .books
            .find_books_of_author_in_genre(author_id, genre_id)?,
    ))
}

/// Search books by name.
pub async fn search_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<BookDto>>> {
    Ok(Json(state.books.search_books(&params.query)?))
}

/// Create a book for an author and genre.
pub async fn create_book(
    State(state): State<AppState>,
    PathParams((author_id, genre_id)): PathParams<(i64, i64)>,
    JsonBody(req): JsonBody<BookDto>,
) -> Result<(StatusCode, Json<BookDto>)> {
    let book = state.books.add_book(author_id, genre_id, req)?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace a book.
pub async fn update_book(
    State(state): State<AppState>,
    PathParams(book_id): PathParams<i64>,
    JsonBody(req): JsonBody<BookDto>,
) -> Result<Json<BookDto>> {
    Ok(Json(state.books.update_book(book_id, req)?))
}

/// Delete a book.
pub async fn delete_book(
    State(state): State<AppState>,
    PathParams(book_id): PathParams<i64>,
) -> Result<StatusCode> {
    state.books.delete_book(book_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// GENRES
// ============================================================================

/// Get genre by ID.
pub async fn get_genre(
    State(state): State<AppState>,
    PathParams(genre_id): PathParams<i64>,
) -> Result<Json<GenreDto>> {
    Ok(Json(state.genres.find_genre(genre_id)?))
}

/// Get the genre of a book.
pub async fn get_genre_of_book(
    State(state): State<AppState>,
    PathParams(book_id): PathParams<i64>,
) -> Result<Json<GenreDto>> {
    Ok(Json(state.genres.find_genre_of_book(book_id)?))
}

/// List genres.
pub async fn list_genres(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<GenreDto>>> {
    Ok(Json(state.genres.find_all_genres(&params)?))
}

/// List genres of an author.
pub async fn list_author_genres(
    State(state): State<AppState>,
    PathParams(author_id): PathParams<i64>,
    QueryParams(params): QueryParams<OrderParams>,
) -> Result<Json<Vec<GenreDto>>> {
    Ok(Json(state.genres.find_genres_of_author(author_id, &params)?))
}

/// Search genres by name and description.
pub async fn search_genres(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<GenreDto>>> {
    Ok(Json(state.genres.search_genres(&params.query)?))
}

/// Create a genre.
pub async fn create_genre(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenreDto>,
) -> Result<(StatusCode, Json<GenreDto>)> {
    let genre = state.genres.add_genre(req)?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Replace a genre.
pub async fn update_genre(
    State(state): State<AppState>,
    PathParams(genre_id): PathParams<i64>,
    JsonBody(req): JsonBody<GenreDto>,
) -> Result<Json<GenreDto>> {
    Ok(Json(state.genres.update_genre(genre_id, req)?))
}

/// Delete a genre.
pub async fn delete_genre(
    State(state): State<AppState>,
    PathParams(genre_id): PathParams<i64>,
    QueryParams(params): QueryParams<ForceParams>,
) -> Result<StatusCode> {
    state.genres.delete_genre(genre_id, params.forcibly())?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// API
// ============================================================================

/// Entity counts.
pub async fn api_stats(State(state): State<AppState>) -> Result<Json<CatalogStats>> {
    Ok(Json(state.db.stats()?))
}
