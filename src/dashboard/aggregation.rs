//! Totals derived from the list of transactions.

use rust_decimal::Decimal;

use crate::transaction::{Transaction, TransactionType};

/// Income, expense and balance totals over a list of transactions.
///
/// Values keep full precision, rounding only happens when they are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income: Decimal,
    /// The sum of all expense amounts.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

/// Sum up `transactions` by type.
///
/// An empty list gives an all-zero [Summary]. Totals that would overflow
/// [Decimal] are clamped to [Decimal::MAX] (or [Decimal::MIN] for the
/// balance) rather than panicking.
pub fn aggregate(transactions: &[Transaction]) -> Summary {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), transaction| match transaction.type_ {
            TransactionType::Income => (income.saturating_add(transaction.amount), expense),
            TransactionType::Expense => (income, expense.saturating_add(transaction.amount)),
        },
    );

    Summary {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}
