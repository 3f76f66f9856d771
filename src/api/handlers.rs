use actix_web::{web, HttpResponse};
use futures_util::{StreamExt, TryStreamExt};
use std::future::Future;
use std::time::Instant;

use crate::domain::customer::{AuthorizedSigner, Customer, CustomerError};
use crate::metrics::Metrics;

use super::SharedCustomerService;

type Service = web::Data<SharedCustomerService>;

/// Run one service call and record its outcome
async fn observed<T, F>(metrics: &Metrics, operation: &str, call: F) -> Result<T, CustomerError>
where
    F: Future<Output = Result<T, CustomerError>>,
{
    let started = Instant::now();
    let result = call.await;
    metrics.record_operation(operation, started.elapsed().as_secs_f64(), result.as_ref().err());
    result
}

pub async fn get_all_customers(
    service: Service,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, CustomerError> {
    let customers: Vec<Customer> = observed(
        &metrics,
        "get_all_customers",
        service.get_all_customers().try_collect(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(customers))
}

pub async fn create_customer(
    service: Service,
    metrics: web::Data<Metrics>,
    body: web::Json<Customer>,
) -> Result<HttpResponse, CustomerError> {
    observed(&metrics, "create_customer", service.create_customer(body.into_inner())).await?;
    Ok(HttpResponse::Created().finish())
}

pub async fn update_customer(
    service: Service,
    metrics: web::Data<Metrics>,
    body: web::Json<Customer>,
) -> Result<HttpResponse, CustomerError> {
    observed(&metrics, "update_customer", service.update_customer(body.into_inner())).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn get_customer_by_id(
    service: Service,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomerError> {
    let customer_id = path.into_inner();
    let customer =
        observed(&metrics, "get_customer", service.get_customer_by_id(&customer_id)).await?;
    Ok(HttpResponse::Ok().json(customer))
}

pub async fn delete_customer_by_id(
    service: Service,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomerError> {
    let customer_id = path.into_inner();
    observed(&metrics, "delete_customer", service.delete_customer_by_id(&customer_id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_authorized_signers(
    service: Service,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomerError> {
    let customer_id = path.into_inner();
    let signers: Vec<AuthorizedSigner> = observed(&metrics, "get_authorized_signers", async {
        let stream = service.get_authorized_signers_by_customer_id(&customer_id).await?;
        Ok::<_, CustomerError>(stream.collect().await)
    })
    .await?;

    Ok(HttpResponse::Ok().json(signers))
}

pub async fn create_authorized_signer(
    service: Service,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
    body: web::Json<AuthorizedSigner>,
) -> Result<HttpResponse, CustomerError> {
    let customer_id = path.into_inner();
    observed(
        &metrics,
        "create_authorized_signer",
        service.create_authorized_signer_by_customer_id(&customer_id, body.into_inner()),
    )
    .await?;

    Ok(HttpResponse::Created().finish())
}
