//! Catalog domain: entities, sort/paginate pipeline and search ranking.

pub mod listing;
pub mod model;
pub mod page;
pub mod search;
pub mod sort;

pub use listing::{ListParams, ListQuery, OrderParams};
pub use model::{Author, Book, Genre, SearchCandidate};
pub use page::PageRequest;
pub use sort::{Direction, EntityGroup, SortField, SortSpec};
