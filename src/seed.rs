// 🌱 Seed Data - Where the reference data comes from
//
// Three sources, combined before validation:
//   1. the built-in dataset (default)
//   2. a JSON seed file replacing it: {"authors": [...], "books": [...], "sales": [...]}
//   3. a CSV of extra sales (book_id,quantity,date) appended to either

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::entities::{Author, Book, Sale};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub authors: Vec<Author>,

    #[serde(default)]
    pub books: Vec<Book>,

    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl SeedData {
    /// The dataset the service ships with
    pub fn builtin() -> Self {
        let authors = vec![
            Author::new(1, "Priya Sharma", "priya@email.com", "1234567890", "HDFC0001234"),
            Author::new(2, "Rahul Verma", "rahul@email.com", "0987654321", "ICIC0005678"),
            Author::new(3, "Anita Desai", "anita@email.com", "5678901234", "SBIN0009012"),
        ];

        let books = vec![
            Book::new(1, 1, "The Silent River", 45),
            Book::new(2, 1, "Midnight in Mumbai", 60),
            Book::new(3, 2, "Code & Coffee", 75),
            Book::new(4, 2, "Startup Diaries", 50),
            Book::new(5, 2, "Poetry of Pain", 30),
            Book::new(6, 3, "Garden of Words", 40),
        ];

        let sales = [
            (1, 25, 5),
            (1, 40, 12),
            (2, 15, 8),
            (3, 60, 3),
            (3, 45, 15),
            (4, 30, 10),
            (5, 20, 18),
            (6, 10, 20),
        ]
        .into_iter()
        .filter_map(|(book_id, quantity, day)| {
            NaiveDate::from_ymd_opt(2025, 1, day).map(|date| Sale::new(book_id, quantity, date))
        })
        .collect();

        SeedData { authors, books, sales }
    }

    /// Load a seed document from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read seed file: {:?}", path.as_ref()))?;

        let seed: SeedData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed JSON: {:?}", path.as_ref()))?;

        Ok(seed)
    }

    /// Built-in data, or the given seed file when present
    pub fn load(seed_file: Option<&Path>) -> Result<Self> {
        match seed_file {
            Some(path) => SeedData::from_file(path),
            None => Ok(SeedData::builtin()),
        }
    }

    /// Append sales imported from CSV
    pub fn extend_sales(&mut self, sales: Vec<Sale>) {
        self.sales.extend(sales);
    }

    /// Validate and freeze into a catalog
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.authors, self.books, self.sales)
    }
}

/// Read sales from a CSV file with header `book_id,quantity,date`
pub fn load_sales_csv(csv_path: &Path) -> Result<Vec<Sale>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open sales CSV: {:?}", csv_path))?;

    let mut sales = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        // Header is line 1
        let sale: Sale = result.with_context(|| format!("Failed to parse sale on line {}", line + 2))?;
        sales.push(sale);
    }

    Ok(sales)
}

// ============================================================================
// TESTS
// ============================================================================
