/// In-memory store
///
/// Backs local runs without a database and the integration tests. Shares
/// filter semantics with the Postgres backend through
/// [`ActivityFilter::matches`].
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{demo, ActivityStore, StoreError};
use crate::domain::{Account, ActivityFilter, Transaction};

#[derive(Default)]
struct Inner {
    accounts: HashMap<i64, Account>,
    transactions: HashMap<i64, Vec<Transaction>>,
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn with_demo_data() -> Self {
        let store = Self::new();
        for account in demo::accounts() {
            store.insert_account(account);
        }
        for tx in demo::transactions() {
            store.insert_transaction(tx);
        }
        store
    }

    pub fn insert_account(&self, account: Account) {
        let mut inner = self.inner.lock().unwrap();
        inner.accounts.insert(account.id, account);
    }

    pub fn insert_transaction(&self, tx: Transaction) {
        let mut inner = self.inner.lock().unwrap();
        inner.transactions.entry(tx.account_id).or_default().push(tx);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn account_exists(&self, account_id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.contains_key(&account_id))
    }

    async fn list_activity(
        &self,
        account_id: i64,
        filter: &ActivityFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut matched: Vec<Transaction> = inner
            .transactions
            .get(&account_id)
            .map(|txs| txs.iter().filter(|tx| filter.matches(tx)).cloned().collect())
            .unwrap_or_default();
        // newest first, id as tiebreaker
        matched.sort_by(|a, b| {
            b.posted_on
                .cmp(&a.posted_on)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MonthFilter, TypeFilter};
    use pretty_assertions::assert_eq;

    fn filter(type_filter: TypeFilter, month: MonthFilter) -> ActivityFilter {
        ActivityFilter { type_filter, month }
    }

    #[actix_rt::test]
    async fn unfiltered_listing_returns_all_account_transactions() {
        let store = MemoryStore::with_demo_data();
        let txs = store
            .list_activity(demo::PRIMARY_ACCOUNT, &ActivityFilter::default())
            .await
            .unwrap();
        assert_eq!(txs.len(), 7);
    }

    #[actix_rt::test]
    async fn type_filter_restricts_to_matching_transactions() {
        let store = MemoryStore::with_demo_data();
        let credits = store
            .list_activity(
                demo::PRIMARY_ACCOUNT,
                &filter(TypeFilter::Credit, MonthFilter::All),
            )
            .await
            .unwrap();
        assert_eq!(credits.len(), 1);

        let debits = store
            .list_activity(
                demo::PRIMARY_ACCOUNT,
                &filter(TypeFilter::Debit, MonthFilter::All),
            )
            .await
            .unwrap();
        assert_eq!(debits.len(), 6);
    }

    #[actix_rt::test]
    async fn month_filter_composes_with_type_filter() {
        let store = MemoryStore::with_demo_data();
        let december = store
            .list_activity(
                demo::PRIMARY_ACCOUNT,
                &filter(TypeFilter::All, MonthFilter::In(12)),
            )
            .await
            .unwrap();
        assert_eq!(december.len(), 2);

        let december_debits = store
            .list_activity(
                demo::PRIMARY_ACCOUNT,
                &filter(TypeFilter::Debit, MonthFilter::In(12)),
            )
            .await
            .unwrap();
        assert_eq!(december_debits.len(), 1);
    }

    #[actix_rt::test]
    async fn listing_is_isolated_per_account() {
        let store = MemoryStore::with_demo_data();
        let december = store
            .list_activity(
                demo::PRIMARY_ACCOUNT,
                &filter(TypeFilter::All, MonthFilter::In(12)),
            )
            .await
            .unwrap();
        assert!(december.iter().all(|tx| tx.account_id == demo::PRIMARY_ACCOUNT));

        let other = store
            .list_activity(demo::SECONDARY_ACCOUNT, &ActivityFilter::default())
            .await
            .unwrap();
        assert_eq!(other.len(), 2);
    }

    #[actix_rt::test]
    async fn listing_orders_newest_first() {
        let store = MemoryStore::with_demo_data();
        let txs = store
            .list_activity(demo::PRIMARY_ACCOUNT, &ActivityFilter::default())
            .await
            .unwrap();
        for pair in txs.windows(2) {
            assert!(pair[0].posted_on >= pair[1].posted_on);
        }
        assert_eq!(txs[0].posted_on.to_string(), "2025-12-18");
    }

    #[actix_rt::test]
    async fn unknown_account_has_no_activity_and_does_not_exist() {
        let store = MemoryStore::with_demo_data();
        assert!(!store.account_exists(99_999).await.unwrap());
        let txs = store
            .list_activity(99_999, &ActivityFilter::default())
            .await
            .unwrap();
        assert!(txs.is_empty());
    }
}
