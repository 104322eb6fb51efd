// 💸 Withdrawal - Payout request against an author's balance
//
// Withdrawals are append-only: created by the ledger, never updated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Amount, AuthorId};

/// Withdrawal identifier, assigned sequentially from 1
pub type WithdrawalId = u64;

// ============================================================================
// WITHDRAWAL STATUS
// ============================================================================

/// Lifecycle state of a withdrawal.
///
/// The ledger only ever creates pending withdrawals; nothing moves them on yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
        }
    }
}

// ============================================================================
// WITHDRAWAL RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: WithdrawalId,
    pub author_id: AuthorId,
    pub amount: Amount,
    pub status: WithdrawalStatus,

    #[serde(with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

impl Withdrawal {
    pub fn pending(id: WithdrawalId, author_id: AuthorId, amount: Amount, created_at: DateTime<Utc>) -> Self {
        Withdrawal {
            id,
            author_id,
            amount,
            status: WithdrawalStatus::Pending,
            created_at,
        }
    }
}

/// `2025-01-20T10:15:30.123Z`
mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_withdrawal_json_shape() {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 20, 10, 15, 30).unwrap()
            + chrono::Duration::milliseconds(123);
        let withdrawal = Withdrawal::pending(1, 2, 1000, created_at);

        let json = serde_json::to_value(&withdrawal).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "author_id": 2,
                "amount": 1000,
                "status": "pending",
                "created_at": "2025-01-20T10:15:30.123Z"
            })
        );

        let back: Withdrawal = serde_json::from_value(json).unwrap();
        assert_eq!(back, withdrawal);
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(WithdrawalStatus::Pending.as_str(), "pending");
    }
}
