use serde::{Deserialize, Serialize};

use crate::domain::types::Isbn;

/// Catalogue categories accepted by the add-book endpoint.
pub const BOOK_CATEGORIES: &[(i64, &str)] = &[
    (1, "Fiction"),
    (2, "Literature"),
    (3, "History"),
    (4, "Science"),
    (5, "Technology"),
    (6, "Art"),
    (7, "Philosophy"),
    (8, "Biography"),
    (9, "Children's Books"),
    (10, "Other"),
];

/// Shelf states stored by the backend.
pub const BOOK_STATUSES: &[&str] = &["在馆", "遗失", "维护中"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub category_id: Option<i64>,
    pub available_copies: Option<i64>,
    pub total_copies: Option<i64>,
    pub status: Option<String>,
}

/// Payload of `POST /addbooks`.
#[derive(Clone, Debug, Serialize)]
pub struct NewBook {
    pub isbn: Isbn,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub category_id: i64,
    pub total_copies: i64,
    pub status: String,
}

/// Payload of `PUT /editbook/{isbn}`.
///
/// Blank copy counters are left out so the backend keeps its values.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BookUpdate {
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_copies: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_copies: Option<i64>,
    pub status: String,
}

/// Book suggestion returned by the blog book lookup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookMatch {
    pub isbn: String,
    pub title: String,
}
