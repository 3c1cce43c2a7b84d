//! Book and loan line-item models

use serde::{Deserialize, Serialize};

/// A catalog entry as shown in the book picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub registration_number: String,
    pub authors: String,
    /// Copies currently on the shelf
    pub available_quantity: u32,
}

/// One line of a loan composition.
///
/// Created when a book is toggled into the selection, removed when toggled
/// out. A line item may carry `requested_quantity == 0` (kept visible for
/// the operator) and is then excluded at finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanLineItem {
    pub book_id: i64,
    pub title: String,
    pub registration_number: String,
    pub authors: String,
    pub requested_quantity: u32,
    pub available_quantity: u32,
}

impl LoanLineItem {
    /// Build a line item for a freshly selected book
    pub fn from_book(book: &Book, requested_quantity: u32) -> Self {
        Self {
            book_id: book.id,
            title: book.title.clone(),
            registration_number: book.registration_number.clone(),
            authors: book.authors.clone(),
            requested_quantity,
            available_quantity: book.available_quantity,
        }
    }
}
