#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use backoffice::router::init_router;
use backoffice::state::AppState;
use backoffice_config::{CorsConfig, JwtConfig, jwt::DEFAULT_TOKEN_EXPIRY};
use backoffice_core::{Module, ModulePermission, PermissionSet, hash_password};
use backoffice_db::{MemoryStore, RoleRepository, UserRepository};
use backoffice_models::{NewRole, NewUser, Role};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry: DEFAULT_TOKEN_EXPIRY,
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );
    TestApp {
        router: init_router(state.clone()),
        store,
        state,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn grant(module: Module, permissions: PermissionSet) -> ModulePermission {
    ModulePermission::new(module, permissions)
}

pub fn read_create() -> PermissionSet {
    PermissionSet {
        read: true,
        create: true,
        update: false,
        delete: false,
    }
}

pub async fn create_test_role(app: &TestApp, name: &str, permissions: Vec<ModulePermission>) -> Role {
    app.store
        .create_role(NewRole {
            name: name.to_string(),
            permissions,
        })
        .await
        .unwrap()
}

pub async fn create_admin_role(app: &TestApp) -> Role {
    let permissions = Module::ALL
        .into_iter()
        .map(|module| grant(module, PermissionSet::full()))
        .collect();
    create_test_role(app, "Admin", permissions).await
}

pub async fn create_test_user(app: &TestApp, role_id: Option<Uuid>) -> TestUser {
    let email = generate_unique_email();
    let user = app
        .store
        .create_user(NewUser {
            name: "Test User".to_string(),
            email: email.clone(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id,
        })
        .await
        .unwrap();

    TestUser {
        id: user.id,
        email,
        password: TEST_PASSWORD.to_string(),
    }
}

pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn login(app: &TestApp, user: &TestUser) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": user.email,
            "password": user.password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Creates a user holding `permissions` and returns its token.
pub async fn token_with(app: &TestApp, permissions: Vec<ModulePermission>) -> String {
    let role = create_test_role(app, &format!("Role {}", Uuid::new_v4()), permissions).await;
    let user = create_test_user(app, Some(role.id)).await;
    login(app, &user).await
}

pub async fn admin_token(app: &TestApp) -> String {
    let role = match app.store.find_role_by_name("Admin").await.unwrap() {
        Some(role) => role,
        None => create_admin_role(app).await,
    };
    let user = create_test_user(app, Some(role.id)).await;
    login(app, &user).await
}
