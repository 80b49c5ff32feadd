//! The API endpoints URIs.

/// The page with the summary cards, the new transaction form and the transaction history.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to reload the transactions from the transaction table.
pub const REFRESH_TRANSACTIONS: &str = "/api/transactions/refresh";
/// The route to dismiss the error banner.
pub const ALERT: &str = "/api/alert";
