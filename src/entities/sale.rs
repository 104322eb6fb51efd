// 🧾 Sale Entity - Units of one book sold on one day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BookId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub book_id: BookId,

    /// Units sold (always positive once the catalog is validated)
    pub quantity: u64,

    /// Calendar date of the sale, serialized as YYYY-MM-DD
    pub date: NaiveDate,
}

impl Sale {
    pub fn new(book_id: BookId, quantity: u64, date: NaiveDate) -> Self {
        Sale {
            book_id,
            quantity,
            date,
        }
    }
}
