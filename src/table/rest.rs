//! A [TransactionTable] served over a PostgREST style HTTP API, e.g. a
//! managed Postgres database.

use async_trait::async_trait;
use reqwest::{
    Client as HttpClient, Response,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
    table::{SortDirection, TableError, TransactionTable},
    transaction::{NewTransaction, Transaction},
};

/// Client for a remote transaction table.
///
/// Requests are sent once, there are no retries or timeouts.
#[derive(Debug, Clone)]
pub struct RestTransactionTable {
    http_client: HttpClient,
    headers: HeaderMap,
    base_url: String,
    table: String,
}

impl RestTransactionTable {
    /// The table name used when none is configured.
    pub const DEFAULT_TABLE: &'static str = "transactions";

    /// Create a client for `table` at the project URL `base_url`.
    ///
    /// `access_key` is sent as both the `apikey` header and the bearer token.
    ///
    /// # Errors
    /// Returns [TableError::InvalidAccessKey] if `access_key` cannot be used as a header value.
    pub fn new(base_url: &str, access_key: &str, table: &str) -> Result<Self, TableError> {
        Ok(Self {
            http_client: HttpClient::new(),
            headers: create_headers(access_key)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            table: table.to_owned(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

fn create_headers(access_key: &str) -> Result<HeaderMap, TableError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let api_key = HeaderValue::from_str(access_key).map_err(|_| TableError::InvalidAccessKey)?;
    headers.insert("apikey", api_key);

    let bearer = HeaderValue::from_str(&format!("Bearer {access_key}"))
        .map_err(|_| TableError::InvalidAccessKey)?;
    headers.insert(AUTHORIZATION, bearer);

    Ok(headers)
}

/// Read the JSON body of a successful response or turn the response into a [TableError].
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, TableError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(TableError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|error| TableError::Decode(error.to_string()))
}

#[async_trait]
impl TransactionTable for RestTransactionTable {
    async fn list_transactions(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<Transaction>, TableError> {
        let order = match direction {
            SortDirection::Ascending => "created_at.asc",
            SortDirection::Descending => "created_at.desc",
        };

        let response = self
            .http_client
            .get(self.table_url())
            .headers(self.headers.clone())
            .query(&[("select", "*"), ("order", order)])
            .send()
            .await?;

        let transactions: Vec<Transaction> = parse_response(response).await?;
        tracing::debug!("fetched {} transactions from {}", transactions.len(), self.table);

        Ok(transactions)
    }

    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, TableError> {
        let response = self
            .http_client
            .post(self.table_url())
            .headers(self.headers.clone())
            .header("Prefer", "return=representation")
            .json(&[transaction])
            .send()
            .await?;

        let mut rows: Vec<Transaction> = parse_response(response).await?;

        match rows.len() {
            1 => Ok(rows.remove(0)),
            count => Err(TableError::UnexpectedRowCount(count)),
        }
    }
}
