mod common;

use backoffice_client::navigation::{self, Navigation};
use backoffice_client::store::{PERMISSIONS_KEY, TOKEN_KEY, USER_KEY};
use backoffice_client::{BackofficeClient, ClientError, FileSessionStore, SessionStore};
use backoffice_core::{Action, Module, PermissionSet};
use common::{TestApp, create_test_role, create_test_user, grant, setup_test_app};
use tokio::net::TcpListener;

async fn serve(app: &TestApp) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_login_persists_session_and_drives_navigation() {
    let app = setup_test_app();
    let role = create_test_role(
        &app,
        "Staff",
        vec![
            grant(Module::Products, PermissionSet::read_only()),
            grant(Module::Employees, PermissionSet::full()),
        ],
    )
    .await;
    let user = create_test_user(&app, Some(role.id)).await;
    let base_url = serve(&app).await;
    let dir = tempfile::tempdir().unwrap();

    let client = BackofficeClient::new(base_url, FileSessionStore::new(dir.path())).unwrap();
    let session = client.login(&user.email, &user.password).await.unwrap();

    assert!(session.has_access(Module::Employees, Action::Delete));
    assert!(session.has_access(Module::Products, Action::Read));
    assert!(!session.has_access(Module::Products, Action::Create));
    assert!(!session.has_access(Module::Users, Action::Read));

    for key in [TOKEN_KEY, USER_KEY, PERMISSIONS_KEY] {
        assert!(dir.path().join(key).exists(), "{key} not stored");
    }

    let reloaded = client.session().await.unwrap().unwrap();
    assert_eq!(reloaded, session);

    let labels: Vec<_> = navigation::visible_sections(&reloaded.permissions)
        .iter()
        .map(|section| section.label)
        .collect();
    assert_eq!(labels, vec!["Employees", "Products"]);
    assert_eq!(
        navigation::resolve("/admin", Some(&reloaded)),
        Navigation::Redirect("/admin/employees".to_string())
    );

    let products: serde_json::Value = client.get("/api/products").await.unwrap();
    assert_eq!(products, serde_json::json!([]));

    let err = client.get::<serde_json::Value>("/api/users").await.unwrap_err();
    assert!(
        matches!(&err, ClientError::Server { status: 403, message } if message == "Permission denied"),
        "{err:?}"
    );

    client.logout().await.unwrap();
    assert!(client.session().await.unwrap().is_none());
    assert_eq!(
        navigation::resolve("/admin/products", None),
        Navigation::Redirect("/".to_string())
    );
}

#[tokio::test]
async fn test_rejected_login_stores_nothing() {
    let app = setup_test_app();
    let user = create_test_user(&app, None).await;
    let base_url = serve(&app).await;
    let dir = tempfile::tempdir().unwrap();

    let client = BackofficeClient::new(base_url, FileSessionStore::new(dir.path())).unwrap();
    let err = client.login(&user.email, "wrong-password").await.unwrap_err();

    match err {
        ClientError::InvalidCredentials(message) => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.store().get(TOKEN_KEY).await.unwrap(), None);
    assert!(client.session().await.unwrap().is_none());
}
