// 📖 Catalog - Validated, immutable reference data
//
// Holds authors, books and sales in insertion order. Construction checks the
// referential invariants once, so every lookup afterwards can trust them:
//   - author and book ids are unique
//   - every book points at an existing author, with a non-negative royalty
//   - every sale points at an existing book, with a positive quantity
//   - every author's total earnings fit in an Amount, so later sums and
//     products cannot overflow

use std::collections::{HashMap, HashSet};

use crate::entities::{Amount, Author, AuthorId, Book, BookId, Sale};
use crate::error::CatalogError;

#[derive(Debug, Clone)]
pub struct Catalog {
    authors: Vec<Author>,
    books: Vec<Book>,
    sales: Vec<Sale>,
}

impl Catalog {
    pub fn new(authors: Vec<Author>, books: Vec<Book>, sales: Vec<Sale>) -> Result<Self, CatalogError> {
        let mut author_ids = HashSet::new();
        for author in &authors {
            if !author_ids.insert(author.id) {
                return Err(CatalogError::DuplicateAuthor(author.id));
            }
        }

        let mut book_ids = HashSet::new();
        for book in &books {
            if !book_ids.insert(book.id) {
                return Err(CatalogError::DuplicateBook(book.id));
            }
            if !author_ids.contains(&book.author_id) {
                return Err(CatalogError::UnknownAuthor {
                    book_id: book.id,
                    author_id: book.author_id,
                });
            }
            if book.royalty_per_sale < 0 {
                return Err(CatalogError::NegativeRoyalty {
                    book_id: book.id,
                    royalty: book.royalty_per_sale,
                });
            }
        }

        for (index, sale) in sales.iter().enumerate() {
            if !book_ids.contains(&sale.book_id) {
                return Err(CatalogError::UnknownBook { index, book_id: sale.book_id });
            }
            if sale.quantity == 0 {
                return Err(CatalogError::ZeroQuantity { index, book_id: sale.book_id });
            }
        }

        check_earnings_bounds(&books, &sales)?;

        Ok(Catalog { authors, books, sales })
    }

    /// All authors, in insertion order
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn find_author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    /// Books owned by an author, in insertion order
    pub fn books_by(&self, author_id: AuthorId) -> impl Iterator<Item = &Book> + '_ {
        self.books.iter().filter(move |b| b.author_id == author_id)
    }

    /// Sales of one book, in insertion order
    pub fn sales_of(&self, book_id: BookId) -> impl Iterator<Item = &Sale> + '_ {
        self.sales.iter().filter(move |s| s.book_id == book_id)
    }

    /// Total units sold of one book
    pub fn units_sold(&self, book_id: BookId) -> u64 {
        self.sales_of(book_id).map(|s| s.quantity).sum()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }
}

/// Every book's units, royalty and every author's total must fit in an Amount
fn check_earnings_bounds(books: &[Book], sales: &[Sale]) -> Result<(), CatalogError> {
    let mut units: HashMap<BookId, u64> = HashMap::new();
    for sale in sales {
        let total = units.entry(sale.book_id).or_insert(0);
        *total = total.checked_add(sale.quantity).ok_or_else(|| {
            CatalogError::EarningsOverflow {
                author_id: owner_of(books, sale.book_id),
            }
        })?;
    }

    let mut earnings: HashMap<AuthorId, Amount> = HashMap::new();
    for book in books {
        let overflow = CatalogError::EarningsOverflow { author_id: book.author_id };
        let sold = units.get(&book.id).copied().unwrap_or(0);
        let royalty = book.checked_royalty_for(sold).ok_or_else(|| overflow.clone())?;

        let total = earnings.entry(book.author_id).or_insert(0);
        *total = total.checked_add(royalty).ok_or(overflow)?;
    }

    Ok(())
}

fn owner_of(books: &[Book], book_id: BookId) -> AuthorId {
    books
        .iter()
        .find(|b| b.id == book_id)
        .map(|b| b.author_id)
        .unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn authors() -> Vec<Author> {
        vec![
            Author::new(1, "A", "a@email.com", "1", "IFSC1"),
            Author::new(2, "B", "b@email.com", "2", "IFSC2"),
        ]
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "One", 10), Book::new(2, 1, "Two", 20)],
            vec![Sale::new(1, 3, date(1)), Sale::new(1, 4, date(2)), Sale::new(2, 1, date(3))],
        )
        .unwrap();

        assert_eq!(catalog.authors().len(), 2);
        assert_eq!(catalog.book_count(), 2);
        assert_eq!(catalog.sale_count(), 3);
        assert_eq!(catalog.units_sold(1), 7);
        assert_eq!(catalog.units_sold(2), 1);
        assert_eq!(catalog.books_by(1).count(), 2);
        assert_eq!(catalog.books_by(2).count(), 0);
        assert_eq!(catalog.find_author(2).unwrap().name, "B");
        assert!(catalog.find_author(3).is_none());
    }

    #[test]
    fn test_duplicate_author_rejected() {
        let mut list = authors();
        list.push(Author::new(1, "Again", "x@email.com", "3", "IFSC3"));

        let err = Catalog::new(list, vec![], vec![]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateAuthor(1));
    }

    #[test]
    fn test_duplicate_book_rejected() {
        let err = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "One", 10), Book::new(1, 2, "Other", 10)],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateBook(1));
    }

    #[test]
    fn test_book_with_unknown_author_rejected() {
        let err = Catalog::new(authors(), vec![Book::new(1, 9, "Orphan", 10)], vec![]).unwrap_err();
        assert_eq!(err, CatalogError::UnknownAuthor { book_id: 1, author_id: 9 });
    }

    #[test]
    fn test_negative_royalty_rejected() {
        let err = Catalog::new(authors(), vec![Book::new(1, 1, "Debt", -5)], vec![]).unwrap_err();
        assert_eq!(err, CatalogError::NegativeRoyalty { book_id: 1, royalty: -5 });
    }

    #[test]
    fn test_sale_with_unknown_book_rejected() {
        let err = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "One", 10)],
            vec![Sale::new(1, 1, date(1)), Sale::new(4, 1, date(2))],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::UnknownBook { index: 1, book_id: 4 });
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "One", 10)],
            vec![Sale::new(1, 0, date(1))],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::ZeroQuantity { index: 0, book_id: 1 });
    }

    #[test]
    fn test_quantity_times_royalty_overflow_rejected() {
        let err = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "Bestseller", 75)],
            vec![Sale::new(1, 200_000_000_000_000_000, date(1))],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::EarningsOverflow { author_id: 1 });
    }

    #[test]
    fn test_units_sum_overflow_rejected() {
        let err = Catalog::new(
            authors(),
            vec![Book::new(1, 2, "Bestseller", 1)],
            vec![Sale::new(1, u64::MAX, date(1)), Sale::new(1, 1, date(2))],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::EarningsOverflow { author_id: 2 });
    }

    #[test]
    fn test_author_total_overflow_rejected() {
        // Each book fits on its own, the sum across books does not
        let half = i64::MAX as u64 / 2 + 1;
        let err = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "One", 1), Book::new(2, 1, "Two", 1), Book::new(3, 2, "Three", 1)],
            vec![Sale::new(1, half, date(1)), Sale::new(2, half, date(2)), Sale::new(3, half, date(3))],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::EarningsOverflow { author_id: 1 });
    }

    #[test]
    fn test_large_but_bounded_earnings_accepted() {
        let catalog = Catalog::new(
            authors(),
            vec![Book::new(1, 1, "One", 1), Book::new(2, 2, "Two", 1)],
            vec![Sale::new(1, i64::MAX as u64, date(1)), Sale::new(2, i64::MAX as u64, date(2))],
        )
        .unwrap();
        assert_eq!(catalog.units_sold(1), i64::MAX as u64);
    }

    #[test]
    fn test_zero_royalty_allowed() {
        let catalog = Catalog::new(authors(), vec![Book::new(1, 1, "Free", 0)], vec![]);
        assert!(catalog.is_ok());
    }
}
