// 📚 Book Entity - A sellable work with a fixed royalty rate

use serde::{Deserialize, Serialize};

use super::{Amount, AuthorId, BookId};

/// Book reference record.
///
/// `royalty_per_sale` is what the owning author earns for every unit sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub author_id: AuthorId,
    pub title: String,
    pub royalty_per_sale: Amount,
}

impl Book {
    pub fn new(id: BookId, author_id: AuthorId, title: impl Into<String>, royalty_per_sale: Amount) -> Self {
        Book {
            id,
            author_id,
            title: title.into(),
            royalty_per_sale,
        }
    }

    /// Royalty owed for `units` sold copies.
    ///
    /// Units must come from a validated catalog, which bounds every product.
    pub fn royalty_for(&self, units: u64) -> Amount {
        units as Amount * self.royalty_per_sale
    }

    /// Royalty owed for `units`, or None when it does not fit in an Amount
    pub fn checked_royalty_for(&self, units: u64) -> Option<Amount> {
        Amount::try_from(units).ok()?.checked_mul(self.royalty_per_sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_royalty_for_units() {
        let book = Book::new(3, 2, "Code & Coffee", 75);

        assert_eq!(book.royalty_for(0), 0);
        assert_eq!(book.royalty_for(1), 75);
        assert_eq!(book.royalty_for(105), 7875);
    }

    #[test]
    fn test_checked_royalty_for_overflow() {
        let book = Book::new(3, 2, "Code & Coffee", 75);

        assert_eq!(book.checked_royalty_for(105), Some(7875));
        assert_eq!(book.checked_royalty_for(200_000_000_000_000_000), None);
        assert_eq!(book.checked_royalty_for(u64::MAX), None);
        assert_eq!(Book::new(1, 1, "Free", 0).checked_royalty_for(u64::MAX), None);
        assert_eq!(Book::new(1, 1, "Free", 0).checked_royalty_for(i64::MAX as u64), Some(0));
    }
}
