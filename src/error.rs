// ❗ Error Types - Ledger and catalog failures
//
// Every LedgerError is a caller input error: it maps to a fixed client-facing
// message and is never retried.

use thiserror::Error;

use crate::entities::{Amount, AuthorId, BookId};

// ============================================================================
// LEDGER ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Author not found")]
    AuthorNotFound,

    #[error("{0}")]
    InvalidAmount(AmountError),

    #[error("Insufficient balance")]
    InsufficientBalance { requested: Amount, available: Amount },
}

/// Why a withdrawal amount was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Non-numeric, fractional, zero or negative
    #[error("Amount must be a positive whole number")]
    NotPositiveWhole,

    #[error("Minimum withdrawal is ₹{minimum}")]
    BelowMinimum { minimum: Amount },
}

impl From<AmountError> for LedgerError {
    fn from(err: AmountError) -> Self {
        LedgerError::InvalidAmount(err)
    }
}

// ============================================================================
// CATALOG ERRORS
// ============================================================================

/// Reference data that breaks an invariant of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate author id {0}")]
    DuplicateAuthor(AuthorId),

    #[error("duplicate book id {0}")]
    DuplicateBook(BookId),

    #[error("book {book_id} references unknown author {author_id}")]
    UnknownAuthor { book_id: BookId, author_id: AuthorId },

    #[error("book {book_id} has negative royalty {royalty}")]
    NegativeRoyalty { book_id: BookId, royalty: Amount },

    #[error("sale #{index} references unknown book {book_id}")]
    UnknownBook { index: usize, book_id: BookId },

    #[error("sale #{index} of book {book_id} has zero quantity")]
    ZeroQuantity { index: usize, book_id: BookId },

    #[error("royalty earnings of author {author_id} overflow the amount range")]
    EarningsOverflow { author_id: AuthorId },
}
