#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{employee_json, test_pool};
use serde_json::Value;

async fn count_employees(pool: &sqlx::SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[actix_web::test]
async fn create_then_list() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json(" E1 ", " Jane Smith ", "jane@example.com ", "Engineering"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["employeeId"], "E1");
    assert_eq!(body["data"]["fullName"], "Jane Smith");
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["department"], "Engineering");
    assert!(body["data"]["createdAt"].is_string());
    let created_at = body["data"]["createdAt"].clone();

    let req = test::TestRequest::get().uri("/api/employees").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["employeeId"], "E1");
    assert_eq!(data[0]["createdAt"], created_at);
}

#[actix_web::test]
async fn duplicate_id_is_reported_before_duplicate_email() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json("E1", "Jane Smith", "jane@example.com", "Engineering"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // same id and same email: the id wins
    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json("E1", "Other", "jane@example.com", "Sales"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_EMPLOYEE_ID");
    assert_eq!(body["error"]["message"], "Employee ID already exists");

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json("E2", "Other", "jane@example.com", "Sales"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
    assert_eq!(body["error"]["message"], "Email already exists");

    assert_eq!(count_employees(&pool).await, 1);
}

#[actix_web::test]
async fn invalid_payloads_persist_nothing() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let cases = [
        employee_json("E1", "   ", "jane@example.com", "Engineering"),
        employee_json("E1", "Jane", "not-an-email", "Engineering"),
        employee_json("E1", "Jane", "a@b", "Engineering"),
        employee_json("", "Jane", "jane@example.com", "Engineering"),
        serde_json::json!({ "employeeId": "E1", "fullName": "Jane", "email": "jane@example.com" }),
    ];

    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["details"]["fieldErrors"].is_object());
    }

    assert_eq!(count_employees(&pool).await, 0);
}

#[actix_web::test]
async fn field_errors_use_payload_names() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json("E1", "", "bad", "Ops"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let fields = &body["error"]["details"]["fieldErrors"];
    assert_eq!(fields["fullName"][0], "fullName is required");
    assert_eq!(fields["email"][0], "email must be a valid email");
    assert!(fields.get("employeeId").is_none());
}

#[actix_web::test]
async fn malformed_json_is_a_validation_error() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"employeeId\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Invalid request");
}

#[actix_web::test]
async fn list_filters_by_search_and_department() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    for payload in [
        employee_json("E1", "John Smith", "john@example.com", "Engineering"),
        employee_json("E2", "Alice Brown", "asmith@example.com", "Sales"),
        employee_json("SMI-3", "Carol White", "carol@example.com", "Engineering"),
        employee_json("E4", "Dan Green", "dan@example.com", "Engineering"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let ids = |body: &Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["employeeId"].as_str().unwrap().to_string())
            .collect()
    };

    // ordered by full name: Alice, Carol, Dan, John
    let req = test::TestRequest::get().uri("/api/employees").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), ["E2", "SMI-3", "E4", "E1"]);

    // id, name and email all match; sqlite LIKE ignores ASCII case
    let req = test::TestRequest::get().uri("/api/employees?q=smi").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), ["E2", "SMI-3", "E1"]);

    let req = test::TestRequest::get()
        .uri("/api/employees?q=smi&department=Engineering")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), ["SMI-3", "E1"]);

    let req = test::TestRequest::get()
        .uri("/api/employees?department=Sales")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), ["E2"]);

    // blank filters are ignored, wildcards are literal
    let req = test::TestRequest::get()
        .uri("/api/employees?q=%20%20&department=")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body).len(), 4);

    let req = test::TestRequest::get().uri("/api/employees?q=%25").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(ids(&body).is_empty());
}

#[actix_web::test]
async fn delete_unknown_employee_is_not_found() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::delete().uri("/api/employees/NOPE").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Employee not found");
}

#[actix_web::test]
async fn blank_employee_id_on_delete_is_rejected() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::delete().uri("/api/employees/%20").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "employeeId is required");
}

#[actix_web::test]
async fn delete_removes_employee() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json("E1", "Jane Smith", "jane@example.com", "Engineering"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete().uri("/api/employees/E1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    assert_eq!(count_employees(&pool).await, 0);

    // the id is free again
    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(employee_json("E1", "Jane Smith", "jane@example.com", "Engineering"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn health_and_unknown_routes() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/health/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, serde_json::json!({ "status": "ok" }));

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Route not found: GET /api/nowhere");

    // known path, unsupported method
    let req = test::TestRequest::patch().uri("/api/employees").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Route not found: PATCH /api/employees");
}
