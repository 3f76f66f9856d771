use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Customer Models
// ============================================================================
//
// These types double as request payloads and stored documents. Every field is
// optional because inbound JSON may omit or null anything; the validation
// rules turn missing values into errors before anything reaches the store.
//
// ============================================================================

/// Whether a customer is a natural person or a legal entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Person,
    Company,
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::Person => write!(f, "PERSON"),
            CustomerType::Company => write!(f, "COMPANY"),
        }
    }
}

/// Person allowed to sign on behalf of a company customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedSigner {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthorizedSigner {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Storage key, generated on creation
    #[serde(default)]
    pub id: Option<String>,
    /// Business identifier (tax or document number)
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub customer_type: Option<CustomerType>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// `None` and an empty list are different states
    #[serde(default)]
    pub authorized_signers: Option<Vec<AuthorizedSigner>>,
}

impl Customer {
    /// Copy the mutable fields of `changes` onto this record.
    ///
    /// `id`, `identifier` and `customer_type` are left untouched.
    pub fn apply_update(&mut self, changes: Customer) {
        self.address = changes.address;
        self.birthday = changes.birthday;
        self.email = changes.email;
        self.fullname = changes.fullname;
        self.phone = changes.phone;
        self.authorized_signers = changes.authorized_signers;
    }

    /// Append a signer, creating the list if it was never set
    pub fn add_authorized_signer(&mut self, signer: AuthorizedSigner) {
        self.authorized_signers
            .get_or_insert_with(Vec::new)
            .push(signer);
    }

    pub fn is_person(&self) -> bool {
        self.customer_type == Some(CustomerType::Person)
    }

    pub fn is_company(&self) -> bool {
        self.customer_type == Some(CustomerType::Company)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
