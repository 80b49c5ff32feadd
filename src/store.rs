//! The in-memory list of transactions shown to the user.
//!
//! [TransactionStore] owns the only authoritative copy of the list. Views get
//! read-only [StoreSnapshot]s, either on demand or by subscribing to changes.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::{
    Error,
    clock::Clock,
    table::{SortDirection, TransactionTable},
    transaction::{Transaction, ValidatedTransaction},
};

/// The state of the store at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// All transactions, newest first.
    pub transactions: Arc<[Transaction]>,
    /// Whether transactions are currently being fetched from the table.
    pub is_loading: bool,
    /// The most recent failure, shown to the user until dismissed or until
    /// the next operation starts.
    pub error: Option<String>,
}

/// Keeps the list of transactions in sync with the transaction table.
///
/// Operations that change the list ([TransactionStore::load] and
/// [TransactionStore::add]) run one at a time in the order they were called.
/// Each change is published as a whole new snapshot, so readers never see a
/// partially updated list.
pub struct TransactionStore {
    table: Arc<dyn TransactionTable>,
    clock: Arc<dyn Clock>,
    snapshot: watch::Sender<StoreSnapshot>,
    operation_queue: Mutex<()>,
}

impl TransactionStore {
    /// Create an empty store. Call [TransactionStore::load] to fill it.
    pub fn new(table: Arc<dyn TransactionTable>, clock: Arc<dyn Clock>) -> Self {
        let (snapshot, _) = watch::channel(StoreSnapshot::default());

        Self {
            table,
            clock,
            snapshot,
            operation_queue: Mutex::new(()),
        }
    }

    /// The current state of the store.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.borrow().clone()
    }

    /// The current transactions, newest first.
    pub fn transactions(&self) -> Arc<[Transaction]> {
        self.snapshot.borrow().transactions.clone()
    }

    /// Get notified whenever the state of the store changes.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot.subscribe()
    }

    /// Clear the error shown to the user.
    pub fn dismiss_error(&self) {
        self.snapshot
            .send_if_modified(|snapshot| snapshot.error.take().is_some());
    }

    /// Replace the list with every transaction in the table, newest first.
    ///
    /// The snapshot reports `is_loading` while the request is in flight.
    ///
    /// # Errors
    /// Returns [Error::LoadFailed] if the table cannot be read. The current
    /// list is kept as is and the error is shown to the user. The request is
    /// not retried.
    pub async fn load(&self) -> Result<Arc<[Transaction]>, Error> {
        let _turn = self.operation_queue.lock().await;

        self.snapshot.send_modify(|snapshot| {
            snapshot.is_loading = true;
            snapshot.error = None;
        });

        match self.table.list_transactions(SortDirection::Descending).await {
            Ok(transactions) => {
                let transactions: Arc<[Transaction]> = transactions.into();
                tracing::info!("Loaded {} transactions", transactions.len());

                self.snapshot.send_modify(|snapshot| {
                    snapshot.transactions = transactions.clone();
                    snapshot.is_loading = false;
                });

                Ok(transactions)
            }
            Err(error) => {
                tracing::error!("Error fetching transactions: {error}");
                let error = Error::LoadFailed(error.to_string());

                self.snapshot.send_modify(|snapshot| {
                    snapshot.is_loading = false;
                    snapshot.error = Some(error.to_string());
                });

                Err(error)
            }
        }
    }

    /// Save a new transaction stamped with the current time and put it at
    /// the front of the list.
    ///
    /// # Errors
    /// Returns [Error::SubmitFailed] if the table rejects the insert. The
    /// list is left unchanged and the error is shown to the user. The
    /// request is not retried.
    pub async fn add(&self, request: ValidatedTransaction) -> Result<Transaction, Error> {
        let _turn = self.operation_queue.lock().await;

        self.snapshot.send_modify(|snapshot| snapshot.error = None);

        let record = request.submitted_at(self.clock.now());

        match self.table.insert_transaction(record).await {
            Ok(transaction) => {
                tracing::info!(
                    "Added transaction {} ({} {})",
                    transaction.id,
                    transaction.type_,
                    transaction.amount
                );

                self.snapshot.send_modify(|snapshot| {
                    // The new transaction is the newest by construction, so it
                    // goes first without re-sorting.
                    let transactions = std::iter::once(transaction.clone())
                        .chain(snapshot.transactions.iter().cloned())
                        .collect();
                    snapshot.transactions = transactions;
                });

                Ok(transaction)
            }
            Err(error) => {
                tracing::error!("Error adding transaction: {error}");
                let error = Error::SubmitFailed(error.to_string());

                self.snapshot
                    .send_modify(|snapshot| snapshot.error = Some(error.to_string()));

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{str::FromStr, sync::Arc, time::Duration};

    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::TransactionStore;
    use crate::{
        Error,
        clock::FixedClock,
        dashboard::{Summary, aggregate},
        test_utils::{FakeTransactionTable, fake_transaction},
        transaction::{TransactionType, ValidatedTransaction},
    };

    const NOW: time::OffsetDateTime = datetime!(2024-06-01 12:00:00 UTC);

    fn get_test_store(table: Arc<FakeTransactionTable>) -> TransactionStore {
        TransactionStore::new(table, Arc::new(FixedClock(NOW)))
    }

    fn lunch() -> ValidatedTransaction {
        ValidatedTransaction {
            description: "Lunch".to_owned(),
            amount: Decimal::from_str("12.50").unwrap(),
            type_: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn store_starts_empty() {
        let store = get_test_store(Arc::new(FakeTransactionTable::default()));

        let snapshot = store.snapshot();

        assert!(snapshot.transactions.is_empty());
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn load_replaces_collection() {
        let table = Arc::new(FakeTransactionTable::with_rows(vec![fake_transaction(
            1,
            datetime!(2024-01-01 00:00:00 UTC),
            "Salary",
            "1000",
            TransactionType::Income,
        )]));
        let store = get_test_store(table);

        let loaded = store.load().await.expect("Could not load transactions");

        assert_eq!(loaded.len(), 1);
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(
            aggregate(&store.transactions()),
            Summary {
                income: Decimal::from(1000),
                expense: Decimal::ZERO,
                balance: Decimal::from(1000),
            }
        );
    }

    #[tokio::test]
    async fn load_requests_newest_first() {
        let table = Arc::new(FakeTransactionTable::with_rows(vec![
            fake_transaction(
                1,
                datetime!(2024-01-01 00:00:00 UTC),
                "Old",
                "1",
                TransactionType::Expense,
            ),
            fake_transaction(
                2,
                datetime!(2024-02-01 00:00:00 UTC),
                "New",
                "2",
                TransactionType::Expense,
            ),
        ]));
        let store = get_test_store(table);

        store.load().await.unwrap();

        let ids: Vec<_> = store.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn failed_load_keeps_collection_and_reports_error() {
        let table = Arc::new(FakeTransactionTable::with_rows(vec![fake_transaction(
            1,
            datetime!(2024-01-01 00:00:00 UTC),
            "Salary",
            "1000",
            TransactionType::Income,
        )]));
        let store = get_test_store(table.clone());
        store.load().await.unwrap();
        table.fail_list(true);

        let result = store.load().await;

        assert!(matches!(result, Err(Error::LoadFailed(_))), "got {result:?}");
        let snapshot = store.snapshot();
        assert_eq!(snapshot.transactions.len(), 1);
        assert!(!snapshot.is_loading);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Failed to load transactions. Please check your connection.")
        );
    }

    #[tokio::test]
    async fn add_prepends_with_clock_time_and_table_id() {
        let table = Arc::new(FakeTransactionTable::with_rows(vec![fake_transaction(
            1,
            datetime!(2024-01-01 00:00:00 UTC),
            "Salary",
            "1000",
            TransactionType::Income,
        )]));
        let store = get_test_store(table.clone());
        store.load().await.unwrap();
        let before = aggregate(&store.transactions());

        let added = store.add(lunch()).await.expect("Could not add transaction");

        assert_eq!(added.id, 2);
        assert_eq!(added.created_at, NOW);
        let transactions = store.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0], added);
        assert_eq!(transactions[1].id, 1);
        let after = aggregate(&transactions);
        assert_eq!(
            before.balance - after.balance,
            Decimal::from_str("12.50").unwrap()
        );
        assert_eq!(table.inserted()[0].created_at, NOW);
    }

    #[tokio::test]
    async fn failed_add_keeps_collection_and_reports_error() {
        let table = Arc::new(FakeTransactionTable::default());
        table.fail_insert(true);
        let store = get_test_store(table);

        let result = store.add(lunch()).await;

        assert!(
            matches!(result, Err(Error::SubmitFailed(_))),
            "got {result:?}"
        );
        let snapshot = store.snapshot();
        assert!(snapshot.transactions.is_empty());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Failed to add transaction. Please try again.")
        );
    }

    #[tokio::test]
    async fn next_operation_clears_previous_error() {
        let table = Arc::new(FakeTransactionTable::default());
        table.fail_insert(true);
        let store = get_test_store(table.clone());
        let _ = store.add(lunch()).await;
        assert!(store.snapshot().error.is_some());
        table.fail_insert(false);

        store.load().await.unwrap();

        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn dismiss_error_clears_error() {
        let table = Arc::new(FakeTransactionTable::default());
        table.fail_list(true);
        let store = get_test_store(table);
        let _ = store.load().await;

        store.dismiss_error();

        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_result() {
        let table = Arc::new(FakeTransactionTable::with_rows(vec![fake_transaction(
            1,
            datetime!(2024-01-01 00:00:00 UTC),
            "Salary",
            "1000",
            TransactionType::Income,
        )]));
        table.set_delay(Duration::from_millis(50));
        let store = Arc::new(get_test_store(table));
        let mut receiver = store.subscribe();

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });

        receiver
            .wait_for(|snapshot| snapshot.is_loading)
            .await
            .expect("store was dropped");
        assert!(store.snapshot().transactions.is_empty());

        let snapshot = receiver
            .wait_for(|snapshot| !snapshot.is_loading)
            .await
            .expect("store was dropped")
            .clone();
        assert_eq!(snapshot.transactions.len(), 1);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn overlapping_load_and_add_run_one_after_another() {
        let table = Arc::new(FakeTransactionTable::with_rows(vec![fake_transaction(
            1,
            datetime!(2024-01-01 00:00:00 UTC),
            "Salary",
            "1000",
            TransactionType::Income,
        )]));
        table.set_delay(Duration::from_millis(50));
        let store = Arc::new(get_test_store(table));

        let load = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let add = tokio::spawn({
            let store = store.clone();
            async move { store.add(lunch()).await }
        });

        load.await.unwrap().unwrap();
        add.await.unwrap().unwrap();

        // The add waited for the load, so the load could not overwrite it.
        let ids: Vec<_> = store.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
