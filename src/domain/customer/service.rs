use futures_util::stream::{self, BoxStream, StreamExt};
use uuid::Uuid;

use crate::store::CustomerRepository;

use super::errors::{CustomerError, ValidationError};
use super::model::{AuthorizedSigner, Customer};
use super::validation::{
    validate_customer_no_nulls, validate_customer_not_empty, validate_not_registered,
    validate_signer_no_nulls, validate_signer_not_empty, validate_signers_only_company,
    verify_customer_type,
};

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: Payload → Validation → Store lookup → Field merge → Store save
//
// Holds no state besides the injected repository, so one instance is shared
// by every request.
//
// ============================================================================

pub type CustomerResult<T> = Result<T, CustomerError>;

pub struct CustomerService<R: CustomerRepository> {
    repository: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn get_all_customers(&self) -> BoxStream<'_, CustomerResult<Customer>> {
        self.repository
            .find_all()
            .map(|customer| customer.map_err(CustomerError::from))
            .boxed()
    }

    /// Validate and store a new customer under a freshly generated id
    pub async fn create_customer(&self, mut customer: Customer) -> CustomerResult<()> {
        tracing::debug!(identifier = ?customer.identifier, "Creating customer");

        self.validate_customer(&customer, None).await?;

        let id = Uuid::new_v4().to_string();
        customer.id = Some(id.clone());
        self.repository.save(customer).await?;

        tracing::info!(customer_id = %id, "✅ Customer created");
        Ok(())
    }

    pub async fn get_customer_by_id(&self, customer_id: &str) -> CustomerResult<Customer> {
        self.repository
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| CustomerError::NotFound(customer_id.to_string()))
    }

    /// Replace the mutable fields of an existing customer.
    ///
    /// The stored id and identifier are kept as they are. The payload must
    /// carry the stored customer type, so the type rules checked against the
    /// payload also hold for the merged record.
    pub async fn update_customer(&self, customer: Customer) -> CustomerResult<()> {
        tracing::debug!(customer_id = ?customer.id, "Updating customer");

        let customer_id = customer
            .id
            .clone()
            .ok_or(ValidationError::MissingField("id"))?;
        self.validate_customer(&customer, Some(&customer_id)).await?;

        let mut existing = self.get_customer_by_id(&customer_id).await?;
        if let (Some(stored), Some(requested)) = (existing.customer_type, customer.customer_type) {
            if stored != requested {
                tracing::warn!(customer_id = %customer_id, %stored, %requested, "Customer type change rejected");
                return Err(ValidationError::CustomerTypeChanged { stored, requested }.into());
            }
        }
        existing.apply_update(customer);
        self.repository.save(existing).await?;

        tracing::info!(customer_id = %customer_id, "✅ Customer updated");
        Ok(())
    }

    pub async fn delete_customer_by_id(&self, customer_id: &str) -> CustomerResult<()> {
        let customer = self.get_customer_by_id(customer_id).await?;
        self.repository.delete(&customer).await?;

        tracing::info!(customer_id = %customer_id, "🗑️ Customer deleted");
        Ok(())
    }

    /// Stream the signers of a customer.
    ///
    /// A customer whose list was never set is a conflict; an empty list
    /// yields an empty stream.
    pub async fn get_authorized_signers_by_customer_id(
        &self,
        customer_id: &str,
    ) -> CustomerResult<BoxStream<'static, AuthorizedSigner>> {
        let customer = self.get_customer_by_id(customer_id).await?;

        match customer.authorized_signers {
            Some(signers) => Ok(stream::iter(signers).boxed()),
            None => {
                tracing::warn!(customer_id = %customer_id, "Customer has no authorized signer list");
                Err(CustomerError::NoAuthorizedSigners(customer_id.to_string()))
            }
        }
    }

    pub async fn create_authorized_signer_by_customer_id(
        &self,
        customer_id: &str,
        signer: AuthorizedSigner,
    ) -> CustomerResult<()> {
        validate_signer_no_nulls(&signer)?;
        validate_signer_not_empty(&signer)?;

        let mut customer = self.get_customer_by_id(customer_id).await?;
        customer.add_authorized_signer(signer);
        self.repository.save(customer).await?;

        tracing::info!(customer_id = %customer_id, "✅ Authorized signer added");
        Ok(())
    }

    async fn validate_customer(
        &self,
        customer: &Customer,
        current_id: Option<&str>,
    ) -> CustomerResult<()> {
        let result = self.run_validations(customer, current_id).await;
        if let Err(ref e) = result {
            tracing::warn!(
                identifier = ?customer.identifier,
                code = e.code(),
                error = %e,
                "Customer rejected"
            );
        }
        result
    }

    async fn run_validations(
        &self,
        customer: &Customer,
        current_id: Option<&str>,
    ) -> CustomerResult<()> {
        validate_customer_no_nulls(customer)?;
        validate_customer_not_empty(customer)?;
        verify_customer_type(customer)?;
        if let Some(identifier) = customer.identifier.as_deref() {
            validate_not_registered(identifier, current_id, &self.repository).await?;
        }
        validate_signers_only_company(customer)?;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
