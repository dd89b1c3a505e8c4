use std::time::Duration;

use backoffice_models::{LoginRequest, LoginResponse, MessageResponse};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;
use crate::store::SessionStore;

const LOGIN_PATH: &str = "api/auth/login";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Backoffice API that keeps its session in a
/// [`SessionStore`].
pub struct BackofficeClient<S> {
    http: Client,
    base_url: String,
    store: S,
}

impl<S: SessionStore> BackofficeClient<S> {
    pub fn new(base_url: impl Into<String>, store: S) -> ClientResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Logs in and stores the session.
    ///
    /// Nothing is stored unless the whole response was read; a failed write
    /// clears whatever part of the session made it to storage.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<SessionContext> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::BAD_REQUEST {
            tracing::info!(email = %email, "Login rejected");
            return Err(ClientError::InvalidCredentials(error_message(&body)));
        }
        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        let session = SessionContext::from(serde_json::from_str::<LoginResponse>(&body)?);
        if let Err(e) = session.persist(&self.store).await {
            tracing::error!(error = %e, "Failed to store session");
            self.store.clear().await?;
            return Err(e);
        }

        tracing::info!(email = %email, "Logged in");
        Ok(session)
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.store.clear().await
    }

    pub async fn session(&self) -> ClientResult<Option<SessionContext>> {
        SessionContext::load(&self.store).await
    }

    /// GETs `path` with the stored token.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let session = self.session().await?.ok_or(ClientError::NotLoggedIn)?;

        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&session.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(server_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// The `message` of an error body, or the raw body when it has none.
fn error_message(body: &str) -> String {
    serde_json::from_str::<MessageResponse>(body)
        .map(|response| response.message)
        .unwrap_or_else(|_| body.to_string())
}

fn server_error(status: StatusCode, body: &str) -> ClientError {
    ClientError::Server {
        status: status.as_u16(),
        message: error_message(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    #[test]
    fn test_error_message_prefers_message_field() {
        assert_eq!(error_message(r#"{"message":"Permission denied"}"#), "Permission denied");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = BackofficeClient::new("http://localhost:5000/", MemorySessionStore::new()).unwrap();
        assert_eq!(client.url(LOGIN_PATH), "http://localhost:5000/api/auth/login");
        assert_eq!(client.url("/api/products"), "http://localhost:5000/api/products");
    }

    #[tokio::test]
    async fn test_get_without_session_fails_fast() {
        let client = BackofficeClient::new("http://localhost:1", MemorySessionStore::new()).unwrap();
        let err = client.get::<serde_json::Value>("/api/products").await.unwrap_err();
        assert!(matches!(err, ClientError::NotLoggedIn));
    }
}
