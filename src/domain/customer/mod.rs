// ============================================================================
// Customer Domain
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Models (Customer, AuthorizedSigner, CustomerType)
// - Validation rules
// - Errors (ValidationError, CustomerError)
// - Service (CustomerService, the request orchestrator)
//
// Persistence lives behind the CustomerRepository trait in crate::store.
//
// ============================================================================

pub mod model;
pub mod validation;
pub mod errors;
pub mod service;

// Re-export for convenience
pub use model::*;
pub use errors::*;
pub use service::*;
