// 📒 Ledger Engine - Royalty accrual, balances and withdrawals
//
// Earnings are never stored; they are recomputed from the catalog on every query:
//
//   total_earnings  = Σ over the author's books of (units sold × royalty_per_sale)
//   current_balance = total_earnings - Σ the author's withdrawals
//
// The withdrawal log is the only mutable state. A withdrawal is accepted only if
// it leaves current_balance >= 0, so the balance can never go negative.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::LedgerConfig;
use crate::entities::{Amount, Author, AuthorId, BookId};
use crate::error::{AmountError, LedgerError};
use crate::withdrawal::{Withdrawal, WithdrawalId};

// ============================================================================
// QUERY RESULTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finances {
    pub total_earnings: Amount,
    pub current_balance: Amount,
}

/// One row of the author listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: AuthorId,
    pub name: String,
    #[serde(flatten)]
    pub finances: Finances,
}

/// Per-book earnings inside an author detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookBreakdown {
    pub id: BookId,
    pub title: String,
    pub royalty_per_sale: Amount,
    pub total_sold: u64,
    pub total_royalty: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDetail {
    #[serde(flatten)]
    pub author: Author,
    #[serde(flatten)]
    pub finances: Finances,
    pub total_books: usize,
    pub books: Vec<BookBreakdown>,
}

/// A single sale, projected for the author's sales history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleLine {
    pub book_title: String,
    pub quantity: u64,
    pub royalty_earned: Amount,
    pub sale_date: NaiveDate,
}

/// A freshly created withdrawal plus the balance left right after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawalReceipt {
    #[serde(flatten)]
    pub withdrawal: Withdrawal,
    pub new_balance: Amount,
}

// ============================================================================
// LEDGER ENGINE
// ============================================================================

pub struct LedgerEngine {
    catalog: Catalog,
    config: LedgerConfig,

    /// Append-only, in creation order
    withdrawals: Vec<Withdrawal>,
}

impl LedgerEngine {
    pub fn new(catalog: Catalog, config: LedgerConfig) -> Self {
        LedgerEngine {
            catalog,
            config,
            withdrawals: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of withdrawals created so far
    pub fn withdrawal_count(&self) -> usize {
        self.withdrawals.len()
    }

    /// Earnings and balance of an author.
    ///
    /// No existence check: an unknown author simply owns no books and has
    /// no withdrawals, so both figures are zero.
    pub fn compute_finances(&self, author_id: AuthorId) -> Finances {
        let total_earnings: Amount = self
            .catalog
            .books_by(author_id)
            .map(|book| book.royalty_for(self.catalog.units_sold(book.id)))
            .sum();

        let total_withdrawn: Amount = self
            .withdrawals
            .iter()
            .filter(|w| w.author_id == author_id)
            .map(|w| w.amount)
            .sum();

        Finances {
            total_earnings,
            current_balance: total_earnings - total_withdrawn,
        }
    }

    /// Every author with finances attached, in catalog order
    pub fn list_authors_with_finances(&self) -> Vec<AuthorSummary> {
        self.catalog
            .authors()
            .iter()
            .map(|author| AuthorSummary {
                id: author.id,
                name: author.name.clone(),
                finances: self.compute_finances(author.id),
            })
            .collect()
    }

    pub fn author_detail(&self, author_id: AuthorId) -> Result<AuthorDetail, LedgerError> {
        let author = self.require_author(author_id)?;

        let books: Vec<BookBreakdown> = self
            .catalog
            .books_by(author_id)
            .map(|book| {
                let total_sold = self.catalog.units_sold(book.id);
                BookBreakdown {
                    id: book.id,
                    title: book.title.clone(),
                    royalty_per_sale: book.royalty_per_sale,
                    total_sold,
                    total_royalty: book.royalty_for(total_sold),
                }
            })
            .collect();

        Ok(AuthorDetail {
            author: author.clone(),
            finances: self.compute_finances(author_id),
            total_books: books.len(),
            books,
        })
    }

    /// Sales history of an author, newest first.
    ///
    /// Sales on the same date keep catalog order. Unknown authors get an empty list.
    pub fn author_sales(&self, author_id: AuthorId) -> Vec<SaleLine> {
        let mut lines: Vec<SaleLine> = self
            .catalog
            .books_by(author_id)
            .flat_map(|book| {
                self.catalog.sales_of(book.id).map(move |sale| SaleLine {
                    book_title: book.title.clone(),
                    quantity: sale.quantity,
                    royalty_earned: book.royalty_for(sale.quantity),
                    sale_date: sale.date,
                })
            })
            .collect();

        // Stable: ties keep insertion order
        lines.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        lines
    }

    /// Fails with `AuthorNotFound` unless the author exists
    pub fn require_author(&self, author_id: AuthorId) -> Result<&Author, LedgerError> {
        self.catalog
            .find_author(author_id)
            .ok_or(LedgerError::AuthorNotFound)
    }

    /// Request a withdrawal, stamped with the current time
    pub fn create_withdrawal(
        &mut self,
        author_id: AuthorId,
        amount: Amount,
    ) -> Result<WithdrawalReceipt, LedgerError> {
        self.create_withdrawal_at(author_id, amount, Utc::now())
    }

    /// Request a withdrawal with an explicit creation time.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// author exists, amount positive, amount >= minimum, amount <= balance.
    pub fn create_withdrawal_at(
        &mut self,
        author_id: AuthorId,
        amount: Amount,
        created_at: DateTime<Utc>,
    ) -> Result<WithdrawalReceipt, LedgerError> {
        let result = self.check_withdrawal(author_id, amount);
        let available = match result {
            Ok(available) => available,
            Err(err) => {
                tracing::debug!(author_id, amount, error = %err, "withdrawal rejected");
                return Err(err);
            }
        };

        let id = self.withdrawals.len() as WithdrawalId + 1;
        let withdrawal = Withdrawal::pending(id, author_id, amount, created_at);
        self.withdrawals.push(withdrawal.clone());

        let new_balance = available - amount;
        tracing::info!(author_id, withdrawal_id = id, amount, new_balance, "withdrawal created");

        Ok(WithdrawalReceipt {
            withdrawal,
            new_balance,
        })
    }

    /// Returns the balance the withdrawal would be drawn from
    fn check_withdrawal(&self, author_id: AuthorId, amount: Amount) -> Result<Amount, LedgerError> {
        self.require_author(author_id)?;

        if amount <= 0 {
            return Err(AmountError::NotPositiveWhole.into());
        }

        if amount < self.config.min_withdrawal {
            return Err(AmountError::BelowMinimum {
                minimum: self.config.min_withdrawal,
            }
            .into());
        }

        let available = self.compute_finances(author_id).current_balance;
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        Ok(available)
    }

    /// Withdrawals of an author, newest first (same timestamp keeps creation order)
    pub fn author_withdrawals(&self, author_id: AuthorId) -> Vec<Withdrawal> {
        let mut list: Vec<Withdrawal> = self
            .withdrawals
            .iter()
            .filter(|w| w.author_id == author_id)
            .cloned()
            .collect();

        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

// ============================================================================
// TESTS
// ============================================================================
