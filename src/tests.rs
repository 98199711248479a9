use crate::catalog::{EntityGroup, ListParams, OrderParams};
use crate::config::{Config, PaginationMode};
use crate::db::{CatalogStore, Database};
use crate::dto::{AuthorDto, AuthorName, Birth, BookAdditional, BookDto, BookSize, GenreDto};
use crate::error::AppError;
use crate::server::{AppState, create_router};
use crate::service::{AuthorService, BookService, GenreService};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct Services {
    db: Database,
    authors: AuthorService,
    books: BookService,
    genres: GenreService,
}

fn services(mode: PaginationMode) -> Services {
    let db = Database::open_memory().unwrap();
    let store: Arc<dyn CatalogStore> = Arc::new(db.clone());
    Services {
        authors: AuthorService::new(store.clone(), mode),
        books: BookService::new(store.clone(), mode),
        genres: GenreService::new(store, mode),
        db,
    }
}

fn author(id: i64, first: &str, second: &str) -> AuthorDto {
    AuthorDto {
        author_id: id,
        author_name: AuthorName {
            first: first.to_string(),
            second: second.to_string(),
        },
        nationality: "british".to_string(),
        birth: Birth {
            date: NaiveDate::from_ymd_opt(1903, 6, 25),
            country: "India".to_string(),
            city: "Motihari".to_string(),
        },
        author_description: String::new(),
    }
}

fn genre(id: i64, name: &str, description: &str) -> GenreDto {
    GenreDto {
        genre_id: id,
        genre_name: name.to_string(),
        genre_description: description.to_string(),
    }
}

fn book(id: i64, name: &str, width: f64, length: f64, height: f64) -> BookDto {
    BookDto {
        book_id: id,
        book_name: name.to_string(),
        book_language: "english".to_string(),
        book_description: String::new(),
        publication_year: 1949,
        additional: BookAdditional {
            page_count: 300,
            size: BookSize {
                width,
                length,
                height,
            },
        },
    }
}

fn book_ids(books: &[BookDto]) -> Vec<i64> {
    books.iter().map(|b| b.book_id).collect()
}

fn list(sort_by: &str, order_type: &str) -> ListParams {
    ListParams {
        sort_by: Some(sort_by.to_string()),
        order_type: Some(order_type.to_string()),
        ..Default::default()
    }
}

/// Two authors, two genres, four books.
fn seeded(mode: PaginationMode) -> Services {
    let s = services(mode);
    s.authors.add_author(author(1, "George", "Orwell")).unwrap();
    s.authors.add_author(author(2, "Aldous", "Huxley")).unwrap();
    s.genres.add_genre(genre(1, "Dystopia", "Bleak futures")).unwrap();
    s.genres.add_genre(genre(2, "Essay", "Short prose")).unwrap();
    s.books
        .add_book(1, 1, book(10, "Nineteen Eighty-Four", 2.0, 3.0, 1.0))
        .unwrap();
    s.books
        .add_book(1, 2, book(11, "Shooting an Elephant", 1.0, 1.0, 1.0))
        .unwrap();
    s.books
        .add_book(2, 1, book(12, "Brave New World", 3.0, 3.0, 1.0))
        .unwrap();
    s.books
        .add_book(1, 1, book(13, "Animal Farm", 2.0, 3.0, 5.0))
        .unwrap();
    s
}

// ============================================================================
// AUTHORS
// ============================================================================

#[test]
fn author_round_trips_through_storage() {
    let s = services(PaginationMode::Storage);
    let created = s.authors.add_author(author(1, "George", "Orwell")).unwrap();
    assert_eq!(created, author(1, "George", "Orwell"));
    assert_eq!(s.authors.find_author(1).unwrap(), created);
}

#[test]
fn missing_author_is_not_found() {
    let s = services(PaginationMode::Storage);
    assert!(matches!(
        s.authors.find_author(42),
        Err(AppError::NotFound {
            entity: EntityGroup::Author,
            id: 42
        })
    ));
}

#[test]
fn duplicate_author_id_is_rejected() {
    let s = services(PaginationMode::Storage);
    s.authors.add_author(author(1, "George", "Orwell")).unwrap();
    assert!(matches!(
        s.authors.add_author(author(1, "Eric", "Blair")),
        Err(AppError::AlreadyExists { .. })
    ));
}

#[test]
fn blank_author_name_is_rejected() {
    let s = services(PaginationMode::Storage);
    assert!(matches!(
        s.authors.add_author(author(1, "  ", "Orwell")),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn update_author_requires_matching_id() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.authors.update_author(1, author(2, "Eric", "Blair")),
        Err(AppError::IdMismatch)
    ));

    let updated = s.authors.update_author(1, author(1, "Eric", "Blair")).unwrap();
    assert_eq!(updated.author_name.first, "Eric");
}

#[test]
fn update_missing_author_is_not_found() {
    let s = services(PaginationMode::Storage);
    assert!(matches!(
        s.authors.update_author(5, author(5, "Eric", "Blair")),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn author_of_book_and_missing_book() {
    let s = seeded(PaginationMode::Storage);
    assert_eq!(s.authors.find_author_of_book(12).unwrap().author_id, 2);
    assert!(matches!(
        s.authors.find_author_of_book(99),
        Err(AppError::NotFound {
            entity: EntityGroup::Book,
            id: 99
        })
    ));
}

#[test]
fn authors_in_genre_are_distinct() {
    let s = seeded(PaginationMode::Storage);
    let authors = s
        .authors
        .find_authors_in_genre(1, &ListParams::default())
        .unwrap();
    let ids: Vec<i64> = authors.iter().map(|a| a.author_id).collect();
    assert_eq!(ids, vec![1, 2]);

    assert!(matches!(
        s.authors.find_authors_in_genre(9, &ListParams::default()),
        Err(AppError::NotFound {
            entity: EntityGroup::Genre,
            ..
        })
    ));
}

#[test]
fn authors_sorted_by_second_name() {
    let s = seeded(PaginationMode::Storage);
    let authors = s
        .authors
        .find_all_authors(&list("authorName.second", "asc"))
        .unwrap();
    let names: Vec<&str> = authors
        .iter()
        .map(|a| a.author_name.second.as_str())
        .collect();
    assert_eq!(names, vec!["Huxley", "Orwell"]);
}

#[test]
fn delete_author_with_books_needs_force() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.authors.delete_author(1, false),
        Err(AppError::RelatedEntitiesPresent { count: 3, .. })
    ));
    assert_eq!(s.db.stats().unwrap().books, 4);

    let removed = s.authors.delete_author(1, true).unwrap();
    assert_eq!(removed.author_id, 1);

    let stats = s.db.stats().unwrap();
    assert_eq!(stats.authors, 1);
    assert_eq!(stats.books, 1);
    assert!(s.books.find_book(10).is_err());
}

#[test]
fn delete_author_without_books() {
    let s = services(PaginationMode::Storage);
    s.authors.add_author(author(3, "Mary", "Shelley")).unwrap();
    s.authors.delete_author(3, false).unwrap();
    assert!(s.authors.find_author(3).is_err());
}

// ============================================================================
// BOOKS
// ============================================================================

#[test]
fn add_book_checks_owners_first() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.books.add_book(9, 9, book(20, "Orphan", 1.0, 1.0, 1.0)),
        Err(AppError::NotFound {
            entity: EntityGroup::Author,
            id: 9
        })
    ));
    assert!(matches!(
        s.books.add_book(1, 9, book(20, "Orphan", 1.0, 1.0, 1.0)),
        Err(AppError::NotFound {
            entity: EntityGroup::Genre,
            id: 9
        })
    ));
    assert!(matches!(
        s.books.add_book(1, 1, book(10, "Duplicate", 1.0, 1.0, 1.0)),
        Err(AppError::AlreadyExists {
            entity: EntityGroup::Book
        })
    ));
}

#[test]
fn negative_book_size_is_rejected() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.books.add_book(1, 1, book(20, "Flat", -1.0, 1.0, 1.0)),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn update_book_keeps_owners() {
    let s = seeded(PaginationMode::Storage);
    let updated = s
        .books
        .update_book(12, book(12, "Brave New World Revisited", 3.0, 3.0, 1.0))
        .unwrap();
    assert_eq!(updated.book_name, "Brave New World Revisited");
    assert_eq!(s.authors.find_author_of_book(12).unwrap().author_id, 2);
    assert_eq!(s.genres.find_genre_of_book(12).unwrap().genre_id, 1);

    assert!(matches!(
        s.books.update_book(12, book(13, "Elsewhere", 1.0, 1.0, 1.0)),
        Err(AppError::IdMismatch)
    ));
}

#[test]
fn delete_book() {
    let s = seeded(PaginationMode::Storage);
    s.books.delete_book(11).unwrap();
    assert!(s.books.find_book(11).is_err());
    assert!(matches!(
        s.books.delete_book(11),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn books_in_genre_only_lists_that_genre() {
    for mode in [PaginationMode::Storage, PaginationMode::Memory] {
        let s = seeded(mode);
        let books = s.books.find_books_in_genre(2, &ListParams::default()).unwrap();
        assert_eq!(book_ids(&books), vec![11]);
    }
}

#[test]
fn books_by_square_break_ties_by_id() {
    let s = seeded(PaginationMode::Storage);
    // Squares: 10 -> 6, 11 -> 1, 12 -> 9, 13 -> 6.
    let books = s.books.find_all_books(&list("square", "desc")).unwrap();
    assert_eq!(book_ids(&books), vec![12, 10, 13, 11]);
}

#[test]
fn books_by_volume() {
    let s = seeded(PaginationMode::Storage);
    // Volumes: 10 -> 6, 11 -> 1, 12 -> 9, 13 -> 30.
    let books = s.books.find_all_books(&list("volume", "ASC")).unwrap();
    assert_eq!(book_ids(&books), vec![11, 10, 12, 13]);
}

#[test]
fn pagination_modes_agree() {
    let params = ListParams {
        sort_by: Some("bookName".to_string()),
        order_type: Some("asc".to_string()),
        page: Some(2),
        size: Some(3),
        pagination: None,
    };

    let storage = seeded(PaginationMode::Storage)
        .books
        .find_all_books(&params)
        .unwrap();
    let memory = seeded(PaginationMode::Memory)
        .books
        .find_all_books(&params)
        .unwrap();

    // Names ascending: Animal Farm, Brave New World, Nineteen Eighty-Four, Shooting an Elephant.
    assert_eq!(book_ids(&storage), vec![11]);
    assert_eq!(storage, memory);
}

#[test]
fn page_past_the_end_is_empty() {
    let s = seeded(PaginationMode::Memory);
    let params = ListParams {
        page: Some(5),
        ..Default::default()
    };
    assert!(s.books.find_all_books(&params).unwrap().is_empty());
}

#[test]
fn disabled_pagination_still_validates_page() {
    let s = seeded(PaginationMode::Storage);
    let params = ListParams {
        page: Some(0),
        pagination: Some(false),
        ..Default::default()
    };
    assert!(matches!(
        s.books.find_all_books(&params),
        Err(AppError::InvalidPage)
    ));

    let params = ListParams {
        pagination: Some(false),
        size: Some(1),
        ..Default::default()
    };
    assert_eq!(s.books.find_all_books(&params).unwrap().len(), 4);
}

#[test]
fn sort_key_is_checked_before_order_type() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.books.find_all_books(&list("bookname", "sideways")),
        Err(AppError::UnknownSortKey { .. })
    ));
    assert!(matches!(
        s.books.find_all_books(&list("bookName", "sideways")),
        Err(AppError::InvalidOrderType { .. })
    ));
}

#[test]
fn list_params_are_checked_before_existence() {
    let s = services(PaginationMode::Storage);
    assert!(matches!(
        s.books.find_books_in_genre(1, &list("nope", "asc")),
        Err(AppError::UnknownSortKey { .. })
    ));
}

#[test]
fn author_books_ordered_without_window() {
    let s = seeded(PaginationMode::Storage);
    let params = OrderParams {
        sort_by: Some("bookName".to_string()),
        order_type: Some("desc".to_string()),
    };
    let books = s.books.find_author_books(1, &params).unwrap();
    assert_eq!(book_ids(&books), vec![11, 10, 13]);
}

#[test]
fn author_books_in_genre() {
    let s = seeded(PaginationMode::Storage);
    let books = s.books.find_books_of_author_in_genre(1, 1).unwrap();
    assert_eq!(book_ids(&books), vec![10, 13]);
    assert!(s.books.find_books_of_author_in_genre(2, 2).unwrap().is_empty());
    assert!(matches!(
        s.books.find_books_of_author_in_genre(1, 7),
        Err(AppError::NotFound {
            entity: EntityGroup::Genre,
            ..
        })
    ));
}

#[test]
fn book_search_ranks_by_prefix_tier() {
    let s = services(PaginationMode::Storage);
    s.authors.add_author(author(1, "Various", "Authors")).unwrap();
    s.genres.add_genre(genre(1, "Fiction", "")).unwrap();
    for (id, name) in [
        (1, "Great Expectations"),
        (2, "The Greater Good"),
        (3, "The Great Gatsby"),
        (4, "Other Stories"),
        (5, "Dune"),
    ] {
        s.books
            .add_book(1, 1, book(id, name, 1.0, 1.0, 1.0))
            .unwrap();
    }

    let found = s.books.search_books("The Great").unwrap();
    let names: Vec<&str> = found.iter().map(|b| b.book_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "The Great Gatsby",
            "The Greater Good",
            "Great Expectations",
            "Other Stories"
        ]
    );
}

#[test]
fn get_books_skips_unknown_ids() {
    let s = seeded(PaginationMode::Storage);
    let mut ids: Vec<i64> = s
        .db
        .get_books(&[13, 99, 10])
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![10, 13]);
    assert!(s.db.get_books(&[]).unwrap().is_empty());
}

#[test]
fn book_search_hydrates_in_rank_order() {
    let s = seeded(PaginationMode::Storage);
    s.books
        .add_book(2, 1, book(14, "Brave New World Revisited", 1.0, 1.0, 1.0))
        .unwrap();
    s.books
        .add_book(2, 2, book(15, "Brave Little Toaster", 1.0, 1.0, 1.0))
        .unwrap();

    // Tier "brave new": 12, 14 by name. Tier "brave": 15. Nothing else matches.
    let found = s.books.search_books("Brave New").unwrap();
    assert_eq!(book_ids(&found), vec![12, 14, 15]);
    assert_eq!(found[1].book_name, "Brave New World Revisited");
}

#[test]
fn book_search_rejects_short_and_blank_queries() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(s.books.search_books("   "), Err(AppError::BlankQuery)));
    assert!(matches!(
        s.books.search_books("Brave"),
        Err(AppError::QueryTooShort { minimum: 6, .. })
    ));
}

#[test]
fn book_search_caps_results() {
    let s = services(PaginationMode::Storage);
    s.authors.add_author(author(1, "Various", "Authors")).unwrap();
    s.genres.add_genre(genre(1, "Fiction", "")).unwrap();
    for id in 1..=8 {
        s.books
            .add_book(1, 1, book(id, &format!("Collected Tales {}", id), 1.0, 1.0, 1.0))
            .unwrap();
    }
    assert_eq!(s.books.search_books("Collected").unwrap().len(), 5);
}

// ============================================================================
// GENRES
// ============================================================================

#[test]
fn genre_names_are_unique() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.genres.add_genre(genre(3, "Dystopia", "")),
        Err(AppError::NameConflict { .. })
    ));
    assert!(matches!(
        s.genres.add_genre(genre(1, "Other", "")),
        Err(AppError::AlreadyExists { .. })
    ));
    assert!(matches!(
        s.genres.update_genre(2, genre(2, "Dystopia", "")),
        Err(AppError::NameConflict { .. })
    ));

    let renamed = s.genres.update_genre(2, genre(2, "Essays", "Prose")).unwrap();
    assert_eq!(renamed.genre_name, "Essays");
    // Keeping its own name is not a conflict.
    s.genres.update_genre(2, genre(2, "Essays", "Short prose")).unwrap();
}

#[test]
fn genres_of_author() {
    let s = seeded(PaginationMode::Storage);
    let params = OrderParams {
        sort_by: Some("genreName".to_string()),
        order_type: Some("desc".to_string()),
    };
    let genres = s.genres.find_genres_of_author(1, &params).unwrap();
    let names: Vec<&str> = genres.iter().map(|g| g.genre_name.as_str()).collect();
    assert_eq!(names, vec!["Essay", "Dystopia"]);
}

#[test]
fn genre_search_ranks_name_hits_first() {
    let s = services(PaginationMode::Storage);
    s.genres
        .add_genre(genre(1, "Adventure", "Stories about science expeditions"))
        .unwrap();
    s.genres
        .add_genre(genre(2, "Science Fiction", "Speculative science and the future"))
        .unwrap();
    s.genres.add_genre(genre(3, "Romance", "Love stories")).unwrap();

    let found = s.genres.search_genres("science").unwrap();
    let ids: Vec<i64> = found.iter().map(|g| g.genre_id).collect();
    assert_eq!(ids, vec![2, 1]);

    assert!(matches!(
        s.genres.search_genres("sci"),
        Err(AppError::QueryTooShort { minimum: 4, .. })
    ));
}

#[test]
fn delete_genre_with_books_needs_force() {
    let s = seeded(PaginationMode::Storage);
    assert!(matches!(
        s.genres.delete_genre(1, false),
        Err(AppError::RelatedEntitiesPresent { count: 3, .. })
    ));

    s.genres.delete_genre(1, true).unwrap();
    let stats = s.db.stats().unwrap();
    assert_eq!(stats.genres, 1);
    assert_eq!(stats.books, 1);
    assert_eq!(s.authors.find_author(2).unwrap().author_id, 2);
}

// ============================================================================
// CONFIG & DATABASE
// ============================================================================

#[test]
fn config_parses_pagination_mode() {
    let config: Config = toml::from_str(
        r#"
        [server]
        bind = "127.0.0.1:9000"

        [pagination]
        mode = "memory"
        "#,
    )
    .unwrap();
    assert_eq!(config.server.bind.port(), 9000);
    assert_eq!(config.pagination.mode, PaginationMode::Memory);
    assert_eq!(
        config.database.path,
        std::path::PathBuf::from("data/catalog.db")
    );
}

#[test]
fn default_config_file_parses() {
    let config: Config = toml::from_str(&Config::generate_default()).unwrap();
    assert_eq!(config.pagination.mode, PaginationMode::Storage);
}

#[test]
fn database_persists_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");

    {
        let db = Database::open(&path).unwrap();
        let store: Arc<dyn CatalogStore> = Arc::new(db);
        GenreService::new(store, PaginationMode::Storage)
            .add_genre(genre(1, "Poetry", ""))
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.stats().unwrap().genres, 1);
}

// ============================================================================
// HTTP
// ============================================================================

fn app() -> axum::Router {
    let db = Database::open_memory().unwrap();
    create_router(AppState::new_with_db(&Config::default(), db))
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn http_crud_flow() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/library/author/new",
        Some(serde_json::json!({
            "authorId": 1,
            "authorName": {"first": "Ursula", "second": "Le Guin"},
            "birth": {"date": "1929-10-21", "country": "USA", "city": "Berkeley"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["authorName"]["second"], "Le Guin");

    let (status, _) = send(
        &app,
        "POST",
        "/api/library/genre/new",
        Some(serde_json::json!({"genreId": 1, "genreName": "Fantasy"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/library/author/1/genre/1/book/new",
        Some(serde_json::json!({
            "bookId": 5,
            "bookName": "A Wizard of Earthsea",
            "publicationYear": 1968,
            "additional": {"pageCount": 183, "size": {"width": 13.0, "length": 20.0, "height": 2.0}}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["additional"]["size"]["length"], 20.0);

    let (status, body) = send(&app, "GET", "/api/library/book/5/author", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authorId"], 1);

    let (status, body) = send(&app, "GET", "/api/library/genre/1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 1);

    let (status, body) = send(&app, "DELETE", "/api/library/genre/1/delete", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/library/genre/1/delete?forcibly=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/api/library/author/1/delete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authorName"]["first"], "Ursula");
}

#[tokio::test]
async fn http_errors_are_json() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/library/author/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().is_some());

    let (status, _) = send(&app, "GET", "/api/library/books?sortBy=bookname", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/library/books?size=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/library/books/search?query=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_malformed_requests_are_json_bad_requests() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/library/genre/new",
        Some(serde_json::json!({"genreName": "NoId"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("genreId"));

    let (status, body) = send(&app, "GET", "/api/library/books?page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, body) = send(&app, "GET", "/api/library/author/xyz", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, body) = send(
        &app,
        "DELETE",
        "/api/library/genre/1/delete?forcibly=maybe",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn http_update_rejects_id_mismatch() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/library/genre/new",
        Some(serde_json::json!({"genreId": 1, "genreName": "Horror"})),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/library/genre/1/update",
        Some(serde_json::json!({"genreId": 2, "genreName": "Gothic"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/library/genre/1/update",
        Some(serde_json::json!({"genreId": 1, "genreName": "Gothic"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genreName"], "Gothic");
}
