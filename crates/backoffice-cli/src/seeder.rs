//! Admin account seeding.

use backoffice_core::{Module, ModulePermission, PermissionSet, hash_password};
use backoffice_db::{DbError, Store};
use backoffice_models::{NewRole, NewUser, Role, User, UserChanges};
use thiserror::Error;

pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to hash password: {0}")]
    Password(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SeededAdmin {
    pub user: User,
    pub role: Role,
    pub role_created: bool,
    /// False when an existing account with the same email was reset.
    pub user_created: bool,
}

/// Full rights on every module, in declaration order.
pub fn admin_permissions() -> Vec<ModulePermission> {
    Module::ALL
        .into_iter()
        .map(|module| ModulePermission::new(module, PermissionSet::full()))
        .collect()
}

async fn admin_role(store: &dyn Store) -> Result<(Role, bool), SeedError> {
    if let Some(role) = store.find_role_by_name(ADMIN_ROLE).await? {
        return Ok((role, false));
    }

    let role = store
        .create_role(NewRole {
            name: ADMIN_ROLE.to_string(),
            permissions: admin_permissions(),
        })
        .await?;
    Ok((role, true))
}

/// Creates the `Admin` role if it is missing and gives `seed.email` a fresh
/// admin account. An existing account with that email gets the new name,
/// password and role.
pub async fn seed_admin(store: &dyn Store, seed: AdminSeed) -> Result<SeededAdmin, SeedError> {
    let (role, role_created) = admin_role(store).await?;
    let password_hash =
        hash_password(&seed.password).map_err(|e| SeedError::Password(e.message()))?;

    let (user, user_created) = match store.find_user_by_email(&seed.email).await? {
        Some(existing) => {
            let changes = UserChanges {
                name: Some(seed.name),
                email: None,
                password_hash: Some(password_hash),
                role_id: Some(role.id),
            };
            (store.update_user(existing.user.id, changes).await?, false)
        }
        None => {
            let user = store
                .create_user(NewUser {
                    name: seed.name,
                    email: seed.email,
                    password_hash,
                    role_id: Some(role.id),
                })
                .await?;
            (user, true)
        }
    };

    Ok(SeededAdmin {
        user,
        role,
        role_created,
        user_created,
    })
}
