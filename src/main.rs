use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mscustomer::api::{self, SharedCustomerService};
use mscustomer::config::{ServiceConfig, StoreBackend};
use mscustomer::domain::customer::CustomerService;
use mscustomer::metrics::Metrics;
use mscustomer::store::{CustomerRepository, InMemoryCustomerRepository, ScyllaCustomerRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;

    // Initialize structured logging with environment-based filtering
    // RUST_LOG wins over the configured filter
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
        )
        .init();

    tracing::info!("🚀 Starting mscustomer");

    // === 1. Select the customer store ===
    let repository: Arc<dyn CustomerRepository> = match config.store.backend {
        StoreBackend::Scylla => Arc::new(
            ScyllaCustomerRepository::connect(&config.store.known_nodes, &config.store.keyspace)
                .await?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(InMemoryCustomerRepository::new())
        }
    };

    // === 2. Wire the service and metrics ===
    let service: web::Data<SharedCustomerService> =
        web::Data::new(CustomerService::new(repository));
    let metrics = web::Data::new(Metrics::new()?);
    tracing::info!("📊 Metrics available at /metrics");

    // === 3. Serve HTTP ===
    let (host, port) = config.bind_address();
    tracing::info!("🌐 Listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(metrics.clone())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    tracing::info!("👋 mscustomer stopped");

    Ok(())
}
