use std::{
    str::FromStr,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    table::{SortDirection, TableError, TransactionTable},
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// An in-memory transaction table that can be told to fail.
#[derive(Default)]
pub(crate) struct FakeTransactionTable {
    rows: Mutex<Vec<Transaction>>,
    inserted: Mutex<Vec<NewTransaction>>,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl FakeTransactionTable {
    pub(crate) fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub(crate) fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    /// Make every request wait for `delay` before responding.
    pub(crate) fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// The records passed to `insert_transaction`, including failed inserts.
    pub(crate) fn inserted(&self) -> Vec<NewTransaction> {
        self.inserted.lock().unwrap().clone()
    }

    async fn wait(&self) {
        let delay = *self.delay.lock().unwrap();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn unavailable() -> TableError {
    TableError::Status {
        status: 503,
        body: r#"{"message":"service unavailable"}"#.to_owned(),
    }
}

#[async_trait]
impl TransactionTable for FakeTransactionTable {
    async fn list_transactions(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<Transaction>, TableError> {
        self.wait().await;

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|row| row.created_at);

        if direction == SortDirection::Descending {
            rows.reverse();
        }

        Ok(rows)
    }

    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, TableError> {
        self.wait().await;
        self.inserted.lock().unwrap().push(transaction.clone());

        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let transaction = transaction.with_id(id);
        rows.push(transaction.clone());

        Ok(transaction)
    }
}

pub(crate) fn fake_transaction(
    id: i64,
    created_at: OffsetDateTime,
    description: &str,
    amount: &str,
    type_: TransactionType,
) -> Transaction {
    Transaction {
        id,
        created_at,
        description: description.to_owned(),
        amount: Decimal::from_str(amount).expect("Invalid test amount"),
        type_,
    }
}
