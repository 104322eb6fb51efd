// Royalty Ledger - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod entities;
pub mod catalog;
pub mod seed;
pub mod withdrawal;
pub mod ledger;
pub mod error;
pub mod config;
pub mod telemetry;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use entities::{Amount, Author, AuthorId, Book, BookId, Sale};
pub use catalog::Catalog;
pub use seed::{load_sales_csv, SeedData};
pub use withdrawal::{Withdrawal, WithdrawalId, WithdrawalStatus};
pub use ledger::{
    AuthorDetail, AuthorSummary, BookBreakdown, Finances, LedgerEngine, SaleLine,
    WithdrawalReceipt,
};
pub use error::{AmountError, CatalogError, LedgerError};
pub use config::{LedgerConfig, ServerConfig};

#[cfg(feature = "server")]
pub use api::{build_router, ApiError, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the ledger engine from configuration: seed file or built-in data,
/// plus any CSV sales, validated into a catalog.
pub fn build_ledger(config: &ServerConfig) -> anyhow::Result<LedgerEngine> {
    use anyhow::Context;

    let mut seed = SeedData::load(config.seed_file.as_deref())?;

    if let Some(csv_path) = &config.sales_csv {
        let sales = load_sales_csv(csv_path)?;
        tracing::info!(count = sales.len(), path = ?csv_path, "imported sales from CSV");
        seed.extend_sales(sales);
    }

    let catalog = seed.into_catalog().context("Invalid reference data")?;
    tracing::info!(
        authors = catalog.authors().len(),
        books = catalog.book_count(),
        sales = catalog.sale_count(),
        "catalog loaded"
    );

    Ok(LedgerEngine::new(catalog, config.ledger))
}
