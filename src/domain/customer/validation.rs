use crate::store::CustomerRepository;

use super::errors::{CustomerError, ValidationError};
use super::model::{AuthorizedSigner, Customer, CustomerType};

// ============================================================================
// Customer Validation Rules
// ============================================================================
//
// Each rule is a separate step so the service can run them in a fixed order
// and stop at the first failure:
//   1. required fields present
//   2. required text fields not blank
//   3. customer type consistent with populated fields
//   4. business identifier not already registered (store lookup)
//   5. authorized signers only on company customers
//
// ============================================================================

fn required<'a, T>(value: &'a Option<T>, field: &'static str) -> Result<&'a T, ValidationError> {
    value.as_ref().ok_or(ValidationError::MissingField(field))
}

fn not_blank(value: &Option<String>, field: &'static str) -> Result<(), ValidationError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ValidationError::BlankField(field)),
        _ => Ok(()),
    }
}

pub fn validate_customer_no_nulls(customer: &Customer) -> Result<(), ValidationError> {
    required(&customer.identifier, "identifier")?;
    required(&customer.customer_type, "customerType")?;
    required(&customer.fullname, "fullname")?;
    required(&customer.email, "email")?;
    Ok(())
}

/// `address` and `phone` are optional, but may not be blank when sent
pub fn validate_customer_not_empty(customer: &Customer) -> Result<(), ValidationError> {
    not_blank(&customer.identifier, "identifier")?;
    not_blank(&customer.fullname, "fullname")?;
    not_blank(&customer.address, "address")?;
    not_blank(&customer.email, "email")?;
    not_blank(&customer.phone, "phone")?;
    Ok(())
}

/// Person customers need a birthday; companies must not have one and must
/// carry a signer list, even if it is empty.
pub fn verify_customer_type(customer: &Customer) -> Result<(), ValidationError> {
    match required(&customer.customer_type, "customerType")? {
        CustomerType::Person => {
            if customer.birthday.is_none() {
                return Err(ValidationError::BirthdayRequired);
            }
        }
        CustomerType::Company => {
            if customer.birthday.is_some() {
                return Err(ValidationError::BirthdayNotAllowed);
            }
            if customer.authorized_signers.is_none() {
                return Err(ValidationError::SignersRequired);
            }
        }
    }
    Ok(())
}

pub fn validate_signers_only_company(customer: &Customer) -> Result<(), ValidationError> {
    let has_signers = customer
        .authorized_signers
        .as_ref()
        .is_some_and(|signers| !signers.is_empty());

    if has_signers && !customer.is_company() {
        return Err(ValidationError::SignersNotAllowed);
    }
    Ok(())
}

/// Fail with a conflict if another customer already holds `identifier`.
///
/// `current_id` excludes the record being updated from the check.
pub async fn validate_not_registered<R>(
    identifier: &str,
    current_id: Option<&str>,
    repository: &R,
) -> Result<(), CustomerError>
where
    R: CustomerRepository + ?Sized,
{
    match repository.find_by_identifier(identifier).await? {
        Some(existing) if current_id.is_none() || existing.id.as_deref() != current_id => {
            Err(CustomerError::AlreadyRegistered(identifier.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn validate_signer_no_nulls(signer: &AuthorizedSigner) -> Result<(), ValidationError> {
    required(&signer.name, "name")?;
    required(&signer.email, "email")?;
    Ok(())
}

pub fn validate_signer_not_empty(signer: &AuthorizedSigner) -> Result<(), ValidationError> {
    not_blank(&signer.name, "name")?;
    not_blank(&signer.email, "email")?;
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
