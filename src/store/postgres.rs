/// Postgres store
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};
use std::time::Duration;

use super::{demo, ActivityStore, StoreError};
use crate::config::StoreConfig;
use crate::domain::{ActivityFilter, MonthFilter, Transaction};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.database_url.is_empty() {
            return Err(StoreError::Unavailable(
                "store.database_url is empty".to_string(),
            ));
        }

        tracing::info!(
            max_connections = %config.pg_max_connections,
            connect_timeout_ms = %config.pg_connect_timeout_ms,
            idle_timeout_ms = %config.pg_idle_timeout_ms,
            "Initializing PostgreSQL connection pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.pg_max_connections)
            .acquire_timeout(Duration::from_millis(config.pg_connect_timeout_ms))
            .idle_timeout(Duration::from_millis(config.pg_idle_timeout_ms))
            .connect(&config.database_url)
            .await?;

        if config.run_migrations {
            tracing::info!("Running database migrations");
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        let store = Self { pool };
        if config.seed_demo_data {
            store.seed_demo_data().await?;
        }
        Ok(store)
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the demo data set, skipping rows that already exist.
    async fn seed_demo_data(&self) -> Result<(), StoreError> {
        for account in demo::accounts() {
            sqlx::query(
                r#"
                INSERT INTO accounts (id, owner)
                VALUES ($1, $2)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(account.id)
            .bind(&account.owner)
            .execute(&self.pool)
            .await?;
        }

        for tx in demo::transactions() {
            sqlx::query(
                r#"
                INSERT INTO transactions (id, account_id, transaction_type, amount, description, posted_on)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(tx.id)
            .bind(tx.account_id)
            .bind(tx.transaction_type)
            .bind(tx.amount)
            .bind(&tx.description)
            .bind(tx.posted_on)
            .execute(&self.pool)
            .await?;
        }

        tracing::info!("Demo data seeded");
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for PostgresStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn account_exists(&self, account_id: i64) -> Result<bool, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn list_activity(
        &self,
        account_id: i64,
        filter: &ActivityFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut query_builder = QueryBuilder::new(
            "SELECT id, account_id, transaction_type, amount, description, posted_on \
             FROM transactions WHERE account_id = ",
        );
        query_builder.push_bind(account_id);

        if let Some(ty) = filter.type_filter.as_transaction_type() {
            query_builder.push(" AND transaction_type = ");
            query_builder.push_bind(ty);
        }

        if let MonthFilter::In(month) = filter.month {
            query_builder.push(" AND EXTRACT(MONTH FROM posted_on)::int = ");
            query_builder.push_bind(month as i32);
        }

        query_builder.push(" ORDER BY posted_on DESC, id DESC");

        let txs = query_builder
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;

        Ok(txs)
    }
}
