//! Customer microservice: customer records and their authorized signers.
//!
//! The domain layer validates and orchestrates; `store` adapts persistence;
//! `api` exposes it over HTTP.

pub mod api;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod store;
