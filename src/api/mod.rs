// ============================================================================
// HTTP API
// ============================================================================
//
// Thin actix-web layer over CustomerService. Handlers only translate between
// HTTP and service calls; every rule lives in the domain layer.
//
//   GET    /api/v1/customer
//   POST   /api/v1/customer
//   PUT    /api/v1/customer
//   GET    /api/v1/customer/{customer_id}
//   DELETE /api/v1/customer/{customer_id}
//   GET    /api/v1/customer/{customer_id}/authorized-signers
//   POST   /api/v1/customer/{customer_id}/authorized-signers
//   GET    /health
//   GET    /metrics
//
// ============================================================================

mod error;
mod handlers;

pub use error::ErrorBody;

use actix_web::web;
use std::sync::Arc;

use crate::domain::customer::CustomerService;
use crate::metrics::{health_handler, metrics_handler};
use crate::store::CustomerRepository;

/// Service type shared by all workers; the store is chosen at startup
pub type SharedCustomerService = CustomerService<Arc<dyn CustomerRepository>>;

/// Register routes. Expects `web::Data<SharedCustomerService>` and
/// `web::Data<Metrics>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler))
        .service(
            web::scope("/api/v1/customer")
                .route("", web::get().to(handlers::get_all_customers))
                .route("", web::post().to(handlers::create_customer))
                .route("", web::put().to(handlers::update_customer))
                .route("/{customer_id}", web::get().to(handlers::get_customer_by_id))
                .route("/{customer_id}", web::delete().to(handlers::delete_customer_by_id))
                .route(
                    "/{customer_id}/authorized-signers",
                    web::get().to(handlers::get_authorized_signers),
                )
                .route(
                    "/{customer_id}/authorized-signers",
                    web::post().to(handlers::create_authorized_signer),
                ),
        );
}
