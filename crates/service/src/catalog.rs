use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::errors::ServiceError;

/// A single entry in a book's review list.
///
/// Placeholders are seeded with the catalog and have no owner; they render as
/// whatever JSON they were seeded with. Owned reviews render as
/// `{"username": ..., "review": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Review {
    Owned { username: String, review: String },
    Placeholder(serde_json::Value),
}

impl Review {
    pub fn owned(username: impl Into<String>, review: impl Into<String>) -> Self {
        Review::Owned { username: username.into(), review: review.into() }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            Review::Owned { username, .. } => Some(username),
            Review::Placeholder(_) => None,
        }
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner() == Some(username)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Reviews", default)]
    pub reviews: Vec<Review>,
}

impl Book {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self { isbn: isbn.into(), title: title.into(), author: author.into(), reviews: Vec::new() }
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }
}

/// In-memory book list. Lookups are exact, case-sensitive linear scans.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ISBNs.
    pub fn from_books(books: Vec<Book>) -> Result<Self, ServiceError> {
        let mut seen = HashSet::new();
        for b in &books {
            if !seen.insert(b.isbn.as_str()) {
                return Err(ServiceError::Seed(format!("duplicate ISBN {}", b.isbn)));
            }
        }
        Ok(Self { books })
    }

    /// The built-in seed list served when no seed file is configured.
    pub fn seeded() -> Self {
        let books = vec![
            Book::new("123456", "Hi Book 1", "John Doe").with_reviews(vec![
                Review::Placeholder(json!("best book of the year")),
                Review::Placeholder(json!({})),
            ]),
            Book::new("456", " Journey to Death", "John Doe"),
            Book::new("789012", "Physics ", "Jane Doe"),
            Book::new("34", "Chemistry Book 3", "Michel"),
            Book::new("789", "Math Book 4", "Will"),
            Book::new("7", "Computer Book 5", "Rame"),
            Book::new("78", "Social Book 6", "Sita"),
        ];
        Self { books }
    }

    /// Load a JSON array of books in wire format.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ServiceError::Seed(format!("cannot read {}: {e}", path.display())))?;
        let books: Vec<Book> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Seed(format!("cannot parse {}: {e}", path.display())))?;
        let catalog = Self::from_books(books)?;
        info!(path = %path.display(), books = catalog.books.len(), "catalog loaded from seed file");
        Ok(catalog)
    }

    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Result<&Book, ServiceError> {
        self.books.iter().find(|b| b.isbn == isbn).ok_or(ServiceError::BookNotFound)
    }

    pub(crate) fn find_by_isbn_mut(&mut self, isbn: &str) -> Result<&mut Book, ServiceError> {
        self.books.iter_mut().find(|b| b.isbn == isbn).ok_or(ServiceError::BookNotFound)
    }

    pub fn find_by_author(&self, author: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.author == author).collect()
    }

    pub fn find_by_title(&self, title: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.title == title).collect()
    }

    pub fn get_reviews(&self, isbn: &str) -> Result<&[Review], ServiceError> {
        self.find_by_isbn(isbn).map(|b| b.reviews.as_slice())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
