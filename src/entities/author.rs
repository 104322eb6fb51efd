// ✍️ Author Entity - The payee
// An author owns zero or more books and receives royalties into one bank account.

use serde::{Deserialize, Serialize};

use super::AuthorId;

// ============================================================================
// AUTHOR ENTITY
// ============================================================================

/// Author reference record, seeded at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,

    pub name: String,

    pub email: String,

    /// Payout bank account number
    #[serde(rename = "bank")]
    pub bank_account: String,

    /// Bank routing code (IFSC) of the payout account
    pub ifsc: String,
}

impl Author {
    pub fn new(
        id: AuthorId,
        name: impl Into<String>,
        email: impl Into<String>,
        bank_account: impl Into<String>,
        ifsc: impl Into<String>,
    ) -> Self {
        Author {
            id,
            name: name.into(),
            email: email.into(),
            bank_account: bank_account.into(),
            ifsc: ifsc.into(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
