mod common;

use axum::http::StatusCode;
use backoffice_core::{Module, PermissionSet};
use common::{
    TestUser, admin_token, create_test_role, generate_unique_email, grant, login, send,
    setup_test_app,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_user_then_login() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let role = create_test_role(&app, "Clerk", vec![grant(Module::Products, PermissionSet::read_only())]).await;
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "Ada",
            "email": email,
            "password": "secret123",
            "role": role.id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert_eq!(body["role_id"], role.id.to_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let created = TestUser {
        id: body["id"].as_str().unwrap().parse().unwrap(),
        email,
        password: "secret123".to_string(),
    };
    login(&app, &created).await;
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let body = json!({
        "name": "Ada",
        "email": generate_unique_email(),
        "password": "secret123",
    });

    let (status, _) = send(&app, "POST", "/api/users", Some(&token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = send(&app, "POST", "/api/users", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "User with this email already exists.");
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({ "name": "Ada", "email": "not-an-email", "password": "secret123" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid email format");
}

#[tokio::test]
async fn test_create_user_with_unknown_role() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "Ada",
            "email": generate_unique_email(),
            "password": "secret123",
            "role": Uuid::new_v4(),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Role not found");
}

#[tokio::test]
async fn test_update_user_password_only_when_supplied() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let email = generate_unique_email();
    let (_, created) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({ "name": "Ada", "email": email, "password": "secret123" })),
    )
    .await;
    let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let uri = format!("/api/users/{}", id);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "name": "Ada Lovelace", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada Lovelace");
    login(
        &app,
        &TestUser {
            id,
            email: email.clone(),
            password: "secret123".to_string(),
        },
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "password": "rotated99" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    login(
        &app,
        &TestUser {
            id,
            email,
            password: "rotated99".to_string(),
        },
    )
    .await;
}

#[tokio::test]
async fn test_update_unknown_user() {
    let app = setup_test_app();
    let token = admin_token(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", Uuid::new_v4()),
        Some(&token),
        Some(json!({ "name": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_role_and_list_users() {
    let app = setup_test_app();
    let token = admin_token(&app).await;
    let role = create_test_role(&app, "Auditor", vec![]).await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({ "name": "Grace", "email": generate_unique_email(), "password": "secret123" })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}/role", id),
        Some(&token),
        Some(json!({ "roleId": role.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_id"], role.id.to_string());

    let (status, users) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let grace = users
        .as_array()
        .unwrap()
        .iter()
        .find(|user| user["id"] == id.as_str())
        .unwrap();
    assert_eq!(grace["role"]["name"], "Auditor");
}
