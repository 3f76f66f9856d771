use anyhow::{Result, bail};
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::customer::Customer;
use super::CustomerRepository;

// ============================================================================
// In-Memory Customer Store
// ============================================================================
//
// Keyed by customer id. Clones share the same map, so a test can keep a
// handle to inspect what the service wrote.
//
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<String, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }

    /// Store a record as-is, bypassing the service rules
    pub async fn insert(&self, customer: Customer) -> Result<()> {
        self.save(customer).await.map(|_| ())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    fn find_all(&self) -> BoxStream<'_, Result<Customer>> {
        let customers = self.customers.clone();

        stream::once(async move {
            let snapshot: Vec<Customer> = customers.read().await.values().cloned().collect();
            stream::iter(snapshot.into_iter().map(Ok::<_, anyhow::Error>))
        })
        .flatten()
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|c| c.identifier.as_deref() == Some(identifier))
            .cloned())
    }

    async fn save(&self, customer: Customer) -> Result<Customer> {
        let Some(id) = customer.id.clone() else {
            bail!("Cannot save customer without id");
        };

        self.customers.write().await.insert(id, customer.clone());
        Ok(customer)
    }

    async fn delete(&self, customer: &Customer) -> Result<()> {
        if let Some(id) = customer.id.as_deref() {
            self.customers.write().await.remove(id);
        }
        Ok(())
    }
}
