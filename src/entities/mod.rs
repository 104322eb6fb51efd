// Entity Models - Reference data of the royalty ledger
//
// Authors, books and sales are seeded once and never change.
// Withdrawals are the only mutable records and live in the ledger (see `withdrawal`).

pub mod author;
pub mod book;
pub mod sale;

pub use author::Author;
pub use book::Book;
pub use sale::Sale;

/// Author identifier
pub type AuthorId = u32;

/// Book identifier
pub type BookId = u32;

/// Monetary amount in whole currency units (₹)
pub type Amount = i64;
