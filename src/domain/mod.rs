// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Business rules only. No HTTP, no database drivers; the store is reached
// through crate::store::CustomerRepository.
//
// ============================================================================

pub mod customer;
