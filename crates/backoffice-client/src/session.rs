use backoffice_core::{Action, Module, PermissionMap};
use backoffice_models::{LoginResponse, LoginUser};

use crate::access::{has_access, parse_permissions};
use crate::error::ClientResult;
use crate::store::{PERMISSIONS_KEY, SessionStore, TOKEN_KEY, USER_KEY};

/// A logged-in client session.
///
/// Built from a login response or loaded from a [`SessionStore`], then
/// passed to whatever needs to make access decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: String,
    /// `None` when the cached user summary is missing or unreadable.
    pub user: Option<LoginUser>,
    pub permissions: PermissionMap,
}

impl SessionContext {
    pub fn has_access(&self, module: Module, action: Action) -> bool {
        has_access(&self.permissions, module, action)
    }

    /// Loads the stored session. A missing token means no session.
    pub async fn load(store: &dyn SessionStore) -> ClientResult<Option<Self>> {
        let Some(token) = store.get(TOKEN_KEY).await? else {
            return Ok(None);
        };

        let user = store
            .get(USER_KEY)
            .await?
            .and_then(|raw| serde_json::from_str::<LoginUser>(&raw).ok());
        let permissions = parse_permissions(store.get(PERMISSIONS_KEY).await?.as_deref());

        Ok(Some(Self {
            token,
            user,
            permissions,
        }))
    }

    /// Writes the token, the user summary and the permission snapshot.
    pub async fn persist(&self, store: &dyn SessionStore) -> ClientResult<()> {
        let user = serde_json::to_string(&self.user)?;
        let permissions = serde_json::to_string(&self.permissions)?;

        store.set(TOKEN_KEY, &self.token).await?;
        store.set(USER_KEY, &user).await?;
        store.set(PERMISSIONS_KEY, &permissions).await?;
        Ok(())
    }
}

impl From<LoginResponse> for SessionContext {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            permissions: response.user.permissions.clone(),
            user: Some(response.user),
        }
    }
}
