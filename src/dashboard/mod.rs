//! Dashboard module
//!
//! Derives the income, expense and balance totals from the transactions and
//! renders them as summary cards.

mod aggregation;
mod cards;

pub use aggregation::{Summary, aggregate};
pub use cards::summary_cards_view;
