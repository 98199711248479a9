//! Sort-key resolution and ordering instructions.
//!
//! Every list endpoint accepts a public `sortBy` key spelled the way the key
//! appears in the JSON representation (`bookName`, `authorName.first`, ...).
//! Keys are resolved against a fixed per-group table into storage columns.
//! Book also accepts two derived keys, `square` and `volume`, which have no
//! stored column and are computed from the physical dimensions.

use crate::error::{AppError, Result};
use std::fmt;

/// Entity group a request operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityGroup {
    /// Authors.
    Author,
    /// Books.
    Book,
    /// Genres.
    Genre,
}

const AUTHOR_KEYS: &[(&str, &str)] = &[
    ("authorId", "author_id"),
    ("authorName.first", "first_name"),
    ("authorName.second", "second_name"),
    ("nationality", "nationality"),
    ("birth.date", "birth_date"),
    ("birth.country", "birth_country"),
    ("birth.city", "birth_city"),
    ("authorDescription", "author_description"),
];

const BOOK_KEYS: &[(&str, &str)] = &[
    ("bookId", "book_id"),
    ("bookName", "book_name"),
    ("bookLanguage", "book_language"),
    ("bookDescription", "book_description"),
    ("publicationYear", "publication_year"),
    ("additional.pageCount", "page_count"),
    ("additional.size.width", "book_width"),
    ("additional.size.length", "book_length"),
    ("additional.size.height", "book_height"),
];

const GENRE_KEYS: &[(&str, &str)] = &[
    ("genreId", "genre_id"),
    ("genreName", "genre_name"),
    ("genreDescription", "genre_description"),
];

/// Derived Book key: width * length.
pub const SQUARE_KEY: &str = "square";
/// Derived Book key: width * length * height.
pub const VOLUME_KEY: &str = "volume";

impl EntityGroup {
    /// Public key to storage column table.
    fn aliases(self) -> &'static [(&'static str, &'static str)] {
        match self {
            EntityGroup::Author => AUTHOR_KEYS,
            EntityGroup::Book => BOOK_KEYS,
            EntityGroup::Genre => GENRE_KEYS,
        }
    }

    /// Sort key used when the request does not name one.
    pub fn default_sort_key(self) -> &'static str {
        self.aliases()[0].0
    }

    /// Storage column holding the identifier.
    pub fn id_column(self) -> &'static str {
        self.aliases()[0].1
    }

    /// All public sort keys of the group, derived keys included.
    pub fn sort_keys(self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.aliases().iter().map(|(key, _)| *key).collect();
        if self == EntityGroup::Book {
            keys.extend([SQUARE_KEY, VOLUME_KEY]);
        }
        keys
    }
}

impl fmt::Display for EntityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityGroup::Author => "Author",
            EntityGroup::Book => "Book",
            EntityGroup::Genre => "Genre",
        };
        f.write_str(name)
    }
}

/// Resolved storage field to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Stored column.
    Column(&'static str),
    /// Book width * length.
    Square,
    /// Book width * length * height.
    Volume,
}

impl SortField {
    /// SQL expression for this field.
    pub fn expression(&self) -> &'static str {
        match self {
            SortField::Column(column) => *column,
            SortField::Square => "(book_width * book_length)",
            SortField::Volume => "(book_width * book_length * book_height)",
        }
    }
}

/// Translate a public sort key into a storage field.
///
/// Matching is exact: `bookname` is not `bookName`.
pub fn resolve_sort_key(group: EntityGroup, key: &str) -> Result<SortField> {
    if group == EntityGroup::Book {
        match key {
            SQUARE_KEY => return Ok(SortField::Square),
            VOLUME_KEY => return Ok(SortField::Volume),
            _ => {}
        }
    }

    group
        .aliases()
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, column)| SortField::Column(*column))
        .ok_or_else(|| AppError::UnknownSortKey {
            key: key.to_string(),
        })
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    /// Parse `asc` / `desc`, case-insensitively.
    pub fn resolve(order: &str) -> Result<Self> {
        if order.eq_ignore_ascii_case("asc") {
            Ok(Direction::Ascending)
        } else if order.eq_ignore_ascii_case("desc") {
            Ok(Direction::Descending)
        } else {
            Err(AppError::InvalidOrderType {
                value: order.to_string(),
            })
        }
    }

    /// SQL keyword.
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// Ordering instruction handed to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Group the field belongs to.
    pub group: EntityGroup,
    /// Field to order by.
    pub field: SortField,
    /// Direction of the primary field.
    pub direction: Direction,
}

impl SortSpec {
    /// Combine a resolved field with a direction.
    pub fn new(group: EntityGroup, field: SortField, direction: Direction) -> Self {
        Self {
            group,
            field,
            direction,
        }
    }

    /// Resolve key first, then order type.
    pub fn parse(group: EntityGroup, key: &str, order: &str) -> Result<Self> {
        let field = resolve_sort_key(group, key)?;
        let direction = Direction::resolve(order)?;
        Ok(Self::new(group, field, direction))
    }

    /// Ascending by identifier.
    pub fn by_id(group: EntityGroup) -> Self {
        Self::new(
            group,
            SortField::Column(group.id_column()),
            Direction::Ascending,
        )
    }

    /// `ORDER BY` clause. The identifier is always the final tie-breaker.
    pub fn order_by(&self) -> String {
        let id = self.group.id_column();
        match self.field {
            SortField::Column(column) if column == id => {
                format!("ORDER BY {} {}", id, self.direction.as_sql())
            }
            field => format!(
                "ORDER BY {} {}, {} ASC",
                field.expression(),
                self.direction.as_sql(),
                id
            ),
        }
    }
}
