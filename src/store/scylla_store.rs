use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::sync::Arc;

use crate::domain::customer::Customer;
use super::CustomerRepository;

// ============================================================================
// ScyllaDB Customer Store
// ============================================================================
//
// One row per customer:
//   id          text PRIMARY KEY
//   identifier  text (secondary index, used by the "already registered" rule)
//   document    text (serde_json encoding of the whole Customer)
//   updated_at  timestamp
//
// Saves are plain upserts; no batches, no lightweight transactions.
//
// ============================================================================

pub struct ScyllaCustomerRepository {
    session: Arc<Session>,
}

impl ScyllaCustomerRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Connect to the cluster, create the schema if needed and switch to the keyspace
    pub async fn connect(known_nodes: &[String], keyspace: &str) -> Result<Self> {
        if known_nodes.is_empty() {
            bail!("At least one ScyllaDB node is required");
        }
        check_keyspace_name(keyspace)?;

        tracing::info!(nodes = ?known_nodes, keyspace = %keyspace, "Connecting to ScyllaDB...");

        let mut builder = SessionBuilder::new();
        for node in known_nodes {
            builder = builder.known_node(node);
        }
        let session: Session = builder.build().await?;

        Self::ensure_schema(&session, keyspace).await?;

        Ok(Self::new(Arc::new(session)))
    }

    async fn ensure_schema(session: &Session, keyspace: &str) -> Result<()> {
        session
            .query_unpaged(
                format!(
                    "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH REPLICATION = \
                     {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
                ),
                (),
            )
            .await?;

        session.use_keyspace(keyspace, false).await?;

        session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS customers (
                    id text PRIMARY KEY,
                    identifier text,
                    document text,
                    updated_at timestamp
                )",
                (),
            )
            .await?;

        session
            .query_unpaged(
                "CREATE INDEX IF NOT EXISTS customers_identifier_idx ON customers (identifier)",
                (),
            )
            .await?;

        tracing::debug!(keyspace = %keyspace, "Customer schema ready");
        Ok(())
    }

    async fn find_one(&self, query: &'static str, key: &str) -> Result<Option<Customer>> {
        let result = self.session.query_unpaged(query, (key,)).await?;

        let rows_result = result.into_rows_result()?;

        match rows_result.maybe_first_row::<(String,)>()? {
            Some((document,)) => Ok(Some(decode_document(&document)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CustomerRepository for ScyllaCustomerRepository {
    fn find_all(&self) -> BoxStream<'_, Result<Customer>> {
        let session = self.session.clone();

        stream::once(async move {
            let pager = session.query_iter("SELECT document FROM customers", ()).await?;
            let rows = pager.rows_stream::<(String,)>()?;

            Ok::<_, anyhow::Error>(rows.map(|row| -> Result<Customer> {
                let (document,) = row?;
                decode_document(&document)
            }))
        })
        .try_flatten()
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        self.find_one("SELECT document FROM customers WHERE id = ?", id).await
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Customer>> {
        self.find_one("SELECT document FROM customers WHERE identifier = ?", identifier)
            .await
    }

    async fn save(&self, customer: Customer) -> Result<Customer> {
        let Some(id) = customer.id.clone() else {
            bail!("Cannot save customer without id");
        };
        let document = encode_document(&customer)?;

        self.session
            .query_unpaged(
                "INSERT INTO customers (id, identifier, document, updated_at) VALUES (?, ?, ?, ?)",
                (&id, customer.identifier.as_deref(), &document, Utc::now()),
            )
            .await?;

        tracing::debug!(customer_id = %id, "Saved customer document");
        Ok(customer)
    }

    async fn delete(&self, customer: &Customer) -> Result<()> {
        let Some(id) = customer.id.as_deref() else {
            bail!("Cannot delete customer without id");
        };

        self.session
            .query_unpaged("DELETE FROM customers WHERE id = ?", (id,))
            .await?;

        tracing::debug!(customer_id = %id, "Deleted customer document");
        Ok(())
    }
}

/// Keyspace names are spliced into CQL, so only plain identifiers are accepted
pub(crate) fn check_keyspace_name(keyspace: &str) -> Result<()> {
    let valid = !keyspace.is_empty()
        && keyspace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        bail!("Invalid keyspace name '{keyspace}': only [A-Za-z0-9_] is allowed");
    }
    Ok(())
}

// ============================================================================
// Document Encoding
// ============================================================================

pub(crate) fn encode_document(customer: &Customer) -> Result<String> {
    Ok(serde_json::to_string(customer)?)
}

pub(crate) fn decode_document(document: &str) -> Result<Customer> {
    Ok(serde_json::from_str(document)?)
}

// ============================================================================
// Unit Tests
// ============================================================================
