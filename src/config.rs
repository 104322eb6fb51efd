// ⚙️ Configuration - Environment-driven settings
//
//   PORT                     listening port (default 3000)
//   ROYALTY_SEED_FILE        JSON seed replacing the built-in data
//   ROYALTY_SALES_CSV        extra sales appended to the seed
//   ROYALTY_MIN_WITHDRAWAL   smallest accepted withdrawal (default 500)

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::entities::Amount;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MIN_WITHDRAWAL: Amount = 500;

// ============================================================================
// LEDGER CONFIG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Smallest amount a single withdrawal may request
    pub min_withdrawal: Amount,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            min_withdrawal: DEFAULT_MIN_WITHDRAWAL,
        }
    }
}

// ============================================================================
// SERVER CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub seed_file: Option<PathBuf>,
    pub sales_csv: Option<PathBuf>,
    pub ledger: LedgerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            seed_file: None,
            sales_csv: None,
            ledger: LedgerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(port) = non_empty(lookup("PORT")) {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {:?}", port))?;
        }

        config.seed_file = non_empty(lookup("ROYALTY_SEED_FILE")).map(PathBuf::from);
        config.sales_csv = non_empty(lookup("ROYALTY_SALES_CSV")).map(PathBuf::from);

        if let Some(min) = non_empty(lookup("ROYALTY_MIN_WITHDRAWAL")) {
            let min_withdrawal: Amount = min
                .parse()
                .with_context(|| format!("Invalid ROYALTY_MIN_WITHDRAWAL value: {:?}", min))?;
            if min_withdrawal <= 0 {
                bail!("ROYALTY_MIN_WITHDRAWAL must be positive, got {}", min_withdrawal);
            }
            config.ledger.min_withdrawal = min_withdrawal;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
