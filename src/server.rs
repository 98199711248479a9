//! HTTP server and routes.

mod extract;
mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let author_routes = Router::new()
        .route("/author/{author_id}", get(handlers::get_author))
        .route("/book/{book_id}/author", get(handlers::get_author_of_book))
        .route("/authors", get(handlers::list_authors))
        .route(
            "/genre/{genre_id}/authors",
            get(handlers::list_authors_in_genre),
        )
        .route("/author/new", post(handlers::create_author))
        .route("/author/{author_id}/update", put(handlers::update_author))
        .route("/author/{author_id}/delete", delete(handlers::delete_author));

    let book_routes = Router::new()
        .route("/book/{book_id}", get(handlers::get_book))
        .route("/books", get(handlers::list_books))
        .route("/books/search", get(handlers::search_books))
        .route("/genre/{genre_id}/books", get(handlers::list_books_in_genre))
        .route("/author/{author_id}/books", get(handlers::list_author_books))
        .route(
            "/author/{author_id}/genre/{genre_id}/books",
            get(handlers::list_author_books_in_genre),
        )
        .route(
            "/author/{author_id}/genre/{genre_id}/book/new",
            post(handlers::create_book),
        )
        .route("/book/{book_id}/update", put(handlers::update_book))
        .route("/book/{book_id}/delete", delete(handlers::delete_book));

    let genre_routes = Router::new()
        .route("/genre/{genre_id}", get(handlers::get_genre))
        .route("/book/{book_id}/genre", get(handlers::get_genre_of_book))
        .route("/genres", get(handlers::list_genres))
        .route("/genres/search", get(handlers::search_genres))
        .route("/author/{author_id}/genres", get(handlers::list_author_genres))
        .route("/genre/new", post(handlers::create_genre))
        .route("/genre/{genre_id}/update", put(handlers::update_genre))
        .route("/genre/{genre_id}/delete", delete(handlers::delete_genre));

    let library_routes = Router::new()
        .merge(author_routes)
        .merge(book_routes)
        .merge(genre_routes);

    Router::new()
        .nest("/api/library", library_routes)
        .route("/api/stats", get(handlers::api_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
