// ============================================================================
// Customer Store - Persistence Contract
// ============================================================================
//
// The service only talks to this trait. Adapters:
// - memory/       - HashMap behind a tokio RwLock (tests, local runs)
// - scylla_store/ - one JSON document per customer in ScyllaDB
//
// Failures are reported as anyhow errors and are not interpreted by callers.
//
// ============================================================================

mod memory;
mod scylla_store;

pub use memory::InMemoryCustomerRepository;
pub use scylla_store::ScyllaCustomerRepository;

use anyhow::Result;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use std::sync::Arc;

use crate::domain::customer::Customer;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Lazily stream every stored customer
    fn find_all(&self) -> BoxStream<'_, Result<Customer>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>>;

    /// Look up by business identifier rather than storage key
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Customer>>;

    async fn save(&self, customer: Customer) -> Result<Customer>;

    async fn delete(&self, customer: &Customer) -> Result<()>;
}

#[async_trait]
impl<R: CustomerRepository + ?Sized> CustomerRepository for Arc<R> {
    fn find_all(&self) -> BoxStream<'_, Result<Customer>> {
        (**self).find_all()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Customer>> {
        (**self).find_by_identifier(identifier).await
    }

    async fn save(&self, customer: Customer) -> Result<Customer> {
        (**self).save(customer).await
    }

    async fn delete(&self, customer: &Customer) -> Result<()> {
        (**self).delete(customer).await
    }
}
