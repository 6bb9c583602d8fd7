/// Transaction lookup backends
///
/// The activity controller talks to an [`ActivityStore`]; the concrete
/// backend is chosen from configuration. Postgres backs real deployments,
/// the in-memory store backs local runs and the hermetic test suite.
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::domain::{ActivityFilter, Transaction};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Cheap liveness probe, surfaced through `/readyz`.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn account_exists(&self, account_id: i64) -> Result<bool, StoreError>;

    /// Transactions for one account, filtered, newest first.
    async fn list_activity(
        &self,
        account_id: i64,
        filter: &ActivityFilter,
    ) -> Result<Vec<Transaction>, StoreError>;
}

/// Build the configured backend. Unknown backends and unreachable databases
/// degrade to the seeded in-memory store so the service still comes up.
pub async fn create_store(config: &StoreConfig) -> Arc<dyn ActivityStore> {
    match config.backend.as_str() {
        "postgres" => match postgres::PostgresStore::connect(config).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect Postgres store, falling back to memory");
                Arc::new(memory::MemoryStore::with_demo_data())
            }
        },
        "memory" => Arc::new(memory::MemoryStore::with_demo_data()),
        other => {
            tracing::warn!("Unknown store backend '{}', using memory", other);
            Arc::new(memory::MemoryStore::with_demo_data())
        }
    }
}

/// Fixed demo data set: account 12345 carries 7 transactions (1 credit,
/// 6 debits, 2 posted in December); account 54321 exists so cross-account
/// isolation is observable.
pub mod demo {
    use crate::domain::{Account, Transaction, TransactionType};
    use rust_decimal::Decimal;

    pub const PRIMARY_ACCOUNT: i64 = 12345;
    pub const SECONDARY_ACCOUNT: i64 = 54321;

    pub fn accounts() -> Vec<Account> {
        let created_at: chrono::DateTime<chrono::Utc> = chrono::DateTime::UNIX_EPOCH;
        vec![
            Account {
                id: PRIMARY_ACCOUNT,
                owner: "John Smith".to_string(),
                created_at,
            },
            Account {
                id: SECONDARY_ACCOUNT,
                owner: "Jane Doe".to_string(),
                created_at,
            },
        ]
    }

    pub fn transactions() -> Vec<Transaction> {
        fn tx(
            id: i64,
            account_id: i64,
            ty: TransactionType,
            cents: i64,
            description: &str,
            posted_on: &str,
        ) -> Transaction {
            Transaction {
                id,
                account_id,
                transaction_type: ty,
                amount: Decimal::new(cents, 2),
                description: Some(description.to_string()),
                posted_on: posted_on.parse().expect("demo date"),
            }
        }

        vec![
            tx(1, PRIMARY_ACCOUNT, TransactionType::Credit, 150_000, "Payroll deposit", "2025-12-05"),
            tx(2, PRIMARY_ACCOUNT, TransactionType::Debit, 4_215, "Grocery store", "2025-12-18"),
            tx(3, PRIMARY_ACCOUNT, TransactionType::Debit, 999, "Streaming subscription", "2025-11-03"),
            tx(4, PRIMARY_ACCOUNT, TransactionType::Debit, 12_000, "Utility bill", "2025-10-14"),
            tx(5, PRIMARY_ACCOUNT, TransactionType::Debit, 3_550, "Restaurant", "2025-09-21"),
            tx(6, PRIMARY_ACCOUNT, TransactionType::Debit, 6_000, "Gas station", "2025-08-09"),
            tx(7, PRIMARY_ACCOUNT, TransactionType::Debit, 25_000, "Rent share", "2025-07-01"),
            // second account, including a December credit that must never
            // leak into account 12345's December view
            tx(101, SECONDARY_ACCOUNT, TransactionType::Credit, 80_000, "Payroll deposit", "2025-12-12"),
            tx(102, SECONDARY_ACCOUNT, TransactionType::Debit, 1_500, "Coffee", "2025-11-30"),
        ]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn demo_set_matches_the_documented_counts() {
            let txs: Vec<_> = transactions()
                .into_iter()
                .filter(|t| t.account_id == PRIMARY_ACCOUNT)
                .collect();
            assert_eq!(txs.len(), 7);
            let credits = txs
                .iter()
                .filter(|t| t.transaction_type == TransactionType::Credit)
                .count();
            assert_eq!(credits, 1);
            let december = txs
                .iter()
                .filter(|t| chrono::Datelike::month(&t.posted_on) == 12)
                .count();
            assert_eq!(december, 2);
        }
    }
}
