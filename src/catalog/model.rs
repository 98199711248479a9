//! Catalog entities.

use chrono::NaiveDate;

/// Author record.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    /// Unique author ID.
    pub id: i64,
    /// First part of the name.
    pub first_name: String,
    /// Second part of the name.
    pub second_name: String,
    /// Nationality.
    pub nationality: String,
    /// Birth date, if known.
    pub birth_date: Option<NaiveDate>,
    /// Birth country.
    pub birth_country: String,
    /// Birth city.
    pub birth_city: String,
    /// Free-form description.
    pub description: String,
}

impl Author {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name)
            .trim()
            .to_string()
    }
}

/// Book record. Always owned by one author and one genre.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Unique book ID.
    pub id: i64,
    /// Book title.
    pub name: String,
    /// Language name or code.
    pub language: String,
    /// Book description.
    pub description: String,
    /// Year of publication.
    pub publication_year: i64,
    /// Number of pages.
    pub page_count: i64,
    /// Physical width.
    pub width: f64,
    /// Physical length.
    pub length: f64,
    /// Physical height.
    pub height: f64,
    /// Owning author.
    pub author_id: i64,
    /// Owning genre.
    pub genre_id: i64,
}

/// Genre record. Names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    /// Unique genre ID.
    pub id: i64,
    /// Unique genre name.
    pub name: String,
    /// Genre description.
    pub description: String,
}

/// Lightweight projection used to rank search hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    /// Record ID.
    pub id: i64,
    /// Display name matched against the query.
    pub name: String,
}

impl SearchCandidate {
    /// Create a candidate.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
