use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use mscustomer::api::{self, ErrorBody, SharedCustomerService};
use mscustomer::domain::customer::{Customer, CustomerService};
use mscustomer::metrics::Metrics;
use mscustomer::store::{CustomerRepository, InMemoryCustomerRepository};

macro_rules! init_app {
    ($repo:expr) => {{
        let repository: Arc<dyn CustomerRepository> = Arc::new($repo.clone());
        let service: SharedCustomerService = CustomerService::new(repository);
        test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .app_data(web::Data::new(Metrics::new().unwrap()))
                .configure(api::configure),
        )
        .await
    }};
}

fn company_payload() -> Value {
    json!({
        "identifier": "900123456",
        "customerType": "COMPANY",
        "fullname": "Acme Corp",
        "address": "1 Industrial Way",
        "email": "a@acme.com",
        "phone": "555-0000",
        "authorizedSigners": []
    })
}

fn person_payload() -> Value {
    json!({
        "identifier": "12345678",
        "customerType": "PERSON",
        "fullname": "John Doe",
        "address": "123 Main St",
        "birthday": "1990-05-17",
        "email": "john@example.com",
        "phone": "555-1234"
    })
}

async fn stored_id(repo: &InMemoryCustomerRepository, identifier: &str) -> String {
    repo.find_by_identifier(identifier)
        .await
        .unwrap()
        .and_then(|c| c.id)
        .unwrap()
}

#[actix_web::test]
async fn test_create_list_and_get() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(company_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/v1/customer").to_request();
    let customers: Vec<Customer> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(customers.len(), 1);

    let id = stored_id(&repo, "900123456").await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customer/{id}"))
        .to_request();
    let customer: Customer = test::call_and_read_body_json(&app, req).await;
    assert_eq!(customer.id.as_deref(), Some(id.as_str()));
    assert_eq!(customer.fullname.as_deref(), Some("Acme Corp"));
}

#[actix_web::test]
async fn test_duplicate_identifier_is_conflict() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/customer")
            .set_json(person_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::CONFLICT {
            let body: ErrorBody = test::read_body_json(resp).await;
            assert_eq!(body.code, "ALREADY_REGISTERED");
            assert_eq!(body.status, 409);
        }
    }
}

#[actix_web::test]
async fn test_missing_field_is_bad_request() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let mut payload = person_payload();
    payload["email"] = Value::Null;

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, "VALIDATION_ERROR");
    assert_eq!(body.message, "Field 'email' is required");
    assert!(repo.is_empty().await);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"customerType\": \"ROBOT\"}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, "INVALID_PAYLOAD");
}

#[actix_web::test]
async fn test_unknown_customer_is_not_found() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::get().uri("/api/v1/customer/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, "NOT_FOUND");

    let req = test::TestRequest::delete().uri("/api/v1/customer/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_and_delete() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(person_payload())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let id = stored_id(&repo, "12345678").await;

    let mut changes = person_payload();
    changes["id"] = json!(id);
    changes["address"] = json!("9 Elm St");
    let req = test::TestRequest::put()
        .uri("/api/v1/customer")
        .set_json(changes)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.address.as_deref(), Some("9 Elm St"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/customer/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    assert!(repo.is_empty().await);
}

#[actix_web::test]
async fn test_authorized_signers_flow() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(company_payload())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let id = stored_id(&repo, "900123456").await;
    let uri = format!("/api/v1/customer/{id}/authorized-signers");

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({"name": "Jane Doe", "email": "jane@acme.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let signers: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(signers, json!([{"name": "Jane Doe", "email": "jane@acme.com"}]));
}

#[actix_web::test]
async fn test_minimal_company_payload_is_created() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(json!({
            "identifier": "900123456",
            "customerType": "COMPANY",
            "fullname": "Acme Corp",
            "email": "a@acme.com",
            "authorizedSigners": []
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let id = stored_id(&repo, "900123456").await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customer/{id}/authorized-signers"))
        .to_request();
    let signers: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(signers, json!([]));
}

#[actix_web::test]
async fn test_customer_type_change_is_bad_request() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(company_payload())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let id = stored_id(&repo, "900123456").await;

    let mut changes = person_payload();
    changes["id"] = json!(id);
    changes["identifier"] = json!("900123456");
    let req = test::TestRequest::put()
        .uri("/api/v1/customer")
        .set_json(changes)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_signers_of_person_is_conflict() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/customer")
        .set_json(person_payload())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let id = stored_id(&repo, "12345678").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customer/{id}/authorized-signers"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.code, "NO_AUTHORIZED_SIGNERS");
}

#[actix_web::test]
async fn test_health_and_metrics() {
    let repo = InMemoryCustomerRepository::new();
    let app = init_app!(repo);

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/customer/missing").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("customer_operations_total"));
    assert!(text.contains("customer_operation_failures_total"));
    assert!(text.contains("not_found"));
}
