mod common;

use axum::http::StatusCode;
use common::{TestApp, admin_token, send, setup_test_app};
use serde_json::{Value, json};
use uuid::Uuid;

async fn create(app: &TestApp, token: &str, uri: &str, body: Value) -> Value {
    let (status, body) = send(app, "POST", uri, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {body}");
    body
}

fn id_of(value: &Value) -> &str {
    value["id"].as_str().unwrap()
}

#[tokio::test]
async fn test_enterprise_crud() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let enterprise = create(
        &app,
        &token,
        "/api/enterprises",
        json!({ "name": "Acme", "location": "Pune", "contactInfo": "acme@example.com" }),
    )
    .await;
    assert_eq!(enterprise["contact_info"], "acme@example.com");
    let uri = format!("/api/enterprises/{}", id_of(&enterprise));

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "location": "Mumbai" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Acme");
    assert_eq!(updated["location"], "Mumbai");

    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Enterprise deleted successfully");

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/api/enterprises", Some(&token), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_enterprise_name_required() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/enterprises",
        Some(&token),
        Some(json!({ "location": "Pune" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn test_employee_crud_and_enterprise_link() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let enterprise = create(&app, &token, "/api/enterprises", json!({ "name": "Acme" })).await;

    let employee = create(
        &app,
        &token,
        "/api/employees",
        json!({
            "name": "Grace",
            "department": "Engineering",
            "role": "Engineer",
            "salary": 5000.0,
            "enterprise": id_of(&enterprise),
        }),
    )
    .await;
    assert_eq!(employee["job_title"], "Engineer");
    assert_eq!(employee["status"], "Active");
    assert_eq!(employee["enterprise_id"], enterprise["id"]);

    let uri = format!("/api/employees/{}", id_of(&employee));
    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "status": "Inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Inactive");
    assert_eq!(updated["name"], "Grace");

    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");
}

#[tokio::test]
async fn test_employee_unknown_enterprise() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&token),
        Some(json!({ "name": "Grace", "enterprise": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Referenced enterprise does not exist.");
}

#[tokio::test]
async fn test_employee_negative_salary() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&token),
        Some(json!({ "name": "Grace", "salary": -1.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Salary cannot be negative");
}

#[tokio::test]
async fn test_product_requires_owner() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(&token),
        Some(json!({
            "name": "Widget",
            "sku": "W-1",
            "price": 3.0,
            "enterprise": "",
            "employee": "",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Product must be associated with either an enterprise or an employee."
    );
}

#[tokio::test]
async fn test_product_crud_and_duplicate_sku() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let employee = create(&app, &token, "/api/employees", json!({ "name": "Grace" })).await;

    let body = json!({
        "name": "Widget",
        "sku": "W-1",
        "price": 3.0,
        "category": "Tools",
        "employee": id_of(&employee),
    });
    let product = create(&app, &token, "/api/products", body.clone()).await;
    assert_eq!(product["status"], "active");
    assert_eq!(product["employee_id"], employee["id"]);
    assert!(product["enterprise_id"].is_null());

    let (status, duplicate) = send(&app, "POST", "/api/products", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate["message"], "Product with this SKU already exists.");

    let uri = format!("/api/products/{}", id_of(&product));
    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "price": 4.5, "status": "inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 4.5);
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["sku"], "W-1");

    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");
}

#[tokio::test]
async fn test_deleting_employee_detaches_products() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let enterprise = create(&app, &token, "/api/enterprises", json!({ "name": "Acme" })).await;
    let employee = create(&app, &token, "/api/employees", json!({ "name": "Grace" })).await;
    create(
        &app,
        &token,
        "/api/products",
        json!({
            "name": "Widget",
            "sku": "W-2",
            "price": 1.0,
            "enterprise": id_of(&enterprise),
            "employee": id_of(&employee),
        }),
    )
    .await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/employees/{}", id_of(&employee)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, products) = send(&app, "GET", "/api/products", Some(&token), None).await;
    assert!(products[0]["employee_id"].is_null());
    assert_eq!(products[0]["enterprise_id"], enterprise["id"]);
}

#[tokio::test]
async fn test_update_missing_resource() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    for uri in ["/api/enterprises", "/api/employees", "/api/products"] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("{}/{}", uri, Uuid::new_v4()),
            Some(&token),
            Some(json!({ "name": "Nothing" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}
